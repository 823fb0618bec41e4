//! Epoch/version/release parsing and the RPM token-compare ordering
//! (spec.md §4.3).

use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::error::TypesError;

/// A single token extracted from a version or release string by
/// [`tokenize`]. Mirrors the three cases the RPM comparison algorithm
/// distinguishes: a run of digits, a run of letters, and a leading `~`
/// (tilde), which sorts before everything, including the empty segment.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
enum Token {
    Tilde,
    // Stored as the digit string with leading zeros stripped so that
    // numeric comparison never has to worry about integer overflow for
    // pathologically long version numbers.
    Numeric(String),
    Alpha(String),
}

impl Token {
    fn rank(&self) -> u8 {
        match self {
            Token::Tilde => 0,
            Token::Alpha(_) => 1,
            Token::Numeric(_) => 2,
        }
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Token::Tilde, Token::Tilde) => Ordering::Equal,
            (Token::Numeric(a), Token::Numeric(b)) => {
                // Leading zeros were already stripped, so the longer digit
                // string is numerically larger; ties fall back to a plain
                // string compare (equal length numerals).
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Token::Alpha(a), Token::Alpha(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Splits a version or release string into [`Token`]s the way RPM's
/// `rpmvercmp` does: runs of `[A-Za-z]` and `[0-9]` each form a token,
/// every other byte is a separator (dropped), and a literal `~` is its own
/// token that outranks nothing (see [`Token::rank`]).
fn tokenize(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'~' {
            tokens.push(Token::Tilde);
            i += 1;
        } else if b.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let digits = s[start..i].trim_start_matches('0');
            tokens.push(Token::Numeric(if digits.is_empty() {
                "0".to_string()
            } else {
                digits.to_string()
            }));
        } else if b.is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            tokens.push(Token::Alpha(s[start..i].to_string()));
        } else {
            // Non-alphanumeric, non-tilde: a bare separator run.
            i += 1;
        }
    }
    tokens
}

/// Compares two version-or-release strings using the RPM token-compare
/// algorithm described in spec.md §4.3.3.
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    let ta = tokenize(a);
    let tb = tokenize(b);
    let mut ia = ta.iter();
    let mut ib = tb.iter();
    loop {
        match (ia.next(), ib.next()) {
            (None, None) => return Ordering::Equal,
            // A missing segment compares as though the missing side had an
            // empty string, which tokenizes to nothing; the shorter
            // sequence only wins once a tilde asymmetry has not already
            // decided the comparison, matching rpm's "~" precedes
            // end-of-string rule.
            (Some(Token::Tilde), None) => return Ordering::Less,
            (None, Some(Token::Tilde)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(x), Some(y)) => match x.cmp(y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

/// Epoch, version, release triple (spec.md §3/§4.3).
///
/// `epoch` defaults to `0` when absent from the source string, but callers
/// that must distinguish "absent" from "explicitly zero" (subject parsing,
/// spec.md S2) should keep the original `Option<u32>` around separately;
/// `Evr` itself always normalizes to a concrete epoch for ordering.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Evr {
    epoch: u32,
    version: String,
    release: String,
}

impl Evr {
    /// Builds an EVR from already-separated parts.
    pub fn new(epoch: u32, version: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            epoch,
            version: version.into(),
            release: release.into(),
        }
    }

    /// Builds a version-only synthetic EVR (`v-0` vs `match-0`, spec.md
    /// §4.3) so the release/epoch fields never influence the comparison.
    pub fn version_only(version: impl Into<String>) -> Self {
        Self::new(0, version, "0")
    }

    /// Builds a release-only synthetic EVR (`0-r` vs `0-match`, spec.md
    /// §4.3).
    pub fn release_only(release: impl Into<String>) -> Self {
        Self::new(0, "0", release)
    }

    /// Parses `[epoch:]version[-release]`. Missing epoch defaults to 0;
    /// missing release becomes the empty string.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        let (rest, epoch) = match s.split_once(':') {
            Some((epoch_str, rest)) => {
                let epoch = epoch_str
                    .parse::<u32>()
                    .map_err(|_| TypesError::InvalidEvr(s.to_string()))?;
                (rest, epoch)
            }
            None => (s, 0),
        };
        if rest.is_empty() {
            return Err(TypesError::InvalidEvr(s.to_string()));
        }
        let (version, release) = match rest.split_once('-') {
            Some((v, r)) => (v, r),
            None => (rest, ""),
        };
        if version.is_empty() {
            return Err(TypesError::InvalidEvr(s.to_string()));
        }
        Ok(Self::new(epoch, version, release))
    }

    /// The epoch, defaulting to 0 when not explicitly set.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// The version component.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The release component, empty when unset.
    pub fn release(&self) -> &str {
        &self.release
    }
}

impl Ord for Evr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| rpmvercmp(&self.version, &other.version))
            .then_with(|| rpmvercmp(&self.release, &other.release))
    }
}

impl PartialOrd for Evr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Evr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}", self.version)?;
        if !self.release.is_empty() {
            write!(f, "-{}", self.release)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0", "1.0", Ordering::Equal)]
    #[case("1.0", "2.0", Ordering::Less)]
    #[case("1.0.1", "1.0.0", Ordering::Greater)]
    #[case("1.0", "1.0a", Ordering::Greater)] // numeric beats alpha
    #[case("1.0a", "1.0", Ordering::Less)]
    #[case("5.5p1", "5.5p2", Ordering::Less)]
    #[case("5.5p10", "5.5p1", Ordering::Greater)]
    #[case("10xyz", "10.1xyz", Ordering::Less)]
    #[case("xyz10", "xyz10.1", Ordering::Less)]
    #[case("1.0~rc1", "1.0", Ordering::Less)] // tilde sorts before anything
    #[case("1.0~rc1", "1.0~rc2", Ordering::Less)]
    #[case("1.0", "1.0~rc1", Ordering::Greater)]
    #[case("", "~", Ordering::Greater)] // tilde sorts before empty too
    fn test_rpmvercmp(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(rpmvercmp(a, b), expected);
    }

    #[test]
    fn test_evr_epoch_dominates() {
        let a = Evr::parse("1:1.0-1").unwrap();
        let b = Evr::parse("2.0-1").unwrap();
        assert!(a > b);
    }

    #[test]
    fn test_evr_missing_epoch_defaults_zero() {
        assert_eq!(Evr::parse("1.0-1").unwrap().epoch(), 0);
    }

    #[test]
    fn test_evr_display_elides_zero_epoch() {
        assert_eq!(Evr::new(0, "1.0", "1").to_string(), "1.0-1");
        assert_eq!(Evr::new(5, "1.0", "1").to_string(), "5:1.0-1");
    }

    #[test]
    fn test_evr_display_missing_release() {
        assert_eq!(Evr::new(0, "1.0", "").to_string(), "1.0");
    }

    #[test]
    fn test_version_only_ignores_release() {
        let a = Evr::version_only("1.0");
        let b = Evr::version_only("1.0");
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.release(), "0");
    }
}
