//! Typed package checksums, following `rattler_digest`'s
//! `pub type XHash = digest::Output<X>` convention rather than storing raw
//! hex strings.

use digest::Digest;
use md5::Md5;
use sha2::Sha256;

/// The output of an MD5 digest.
pub type Md5Hash = digest::Output<Md5>;
/// The output of a SHA-256 digest.
pub type Sha256Hash = digest::Output<Sha256>;

/// A package or header checksum, tagged with the algorithm it was computed
/// with (spec.md §3: `checksum` and `hdr-checksum` each carry a type).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Checksum {
    /// MD5 digest.
    Md5(Md5Hash),
    /// SHA-256 digest.
    Sha256(Sha256Hash),
}

impl Checksum {
    /// Parses a hex-encoded digest of the given algorithm.
    pub fn from_hex_md5(hex: &str) -> Option<Self> {
        parse_hex::<16>(hex).map(|bytes| Checksum::Md5(bytes.into()))
    }

    /// Parses a hex-encoded SHA-256 digest.
    pub fn from_hex_sha256(hex: &str) -> Option<Self> {
        parse_hex::<32>(hex).map(|bytes| Checksum::Sha256(bytes.into()))
    }
}

fn parse_hex<const N: usize>(hex: &str) -> Option<[u8; N]> {
    if hex.len() != N * 2 {
        return None;
    }
    let mut out = [0u8; N];
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let s = std::str::from_utf8(chunk).ok()?;
        out[i] = u8::from_str_radix(s, 16).ok()?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_hex_roundtrip() {
        let hex = "d41d8cd98f00b204e9800998ecf8427e";
        let checksum = Checksum::from_hex_md5(hex).unwrap();
        assert!(matches!(checksum, Checksum::Md5(_)));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Checksum::from_hex_sha256("deadbeef").is_none());
    }
}
