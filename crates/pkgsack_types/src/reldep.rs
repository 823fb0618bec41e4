//! Reldep atoms: `name [op evr]` dependency expressions (spec.md §3, §4.4).

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{multispace0, multispace1},
    combinator::{eof, opt},
    sequence::{preceded, terminated},
    IResult, Parser,
};

use crate::evr::Evr;
use crate::name::Name;

/// The comparison operators a reldep may carry, stored as an bitmask so a
/// reldep (or a query filter) can request more than one at once (e.g.
/// `LT | EQ` for `<=`).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ReldepFlags(u8);

impl ReldepFlags {
    /// No comparison: a bare name (`name`), satisfied by any EVR.
    pub const NONE: ReldepFlags = ReldepFlags(0);
    /// `<`
    pub const LT: ReldepFlags = ReldepFlags(1 << 0);
    /// `=`
    pub const EQ: ReldepFlags = ReldepFlags(1 << 1);
    /// `>`
    pub const GT: ReldepFlags = ReldepFlags(1 << 2);
    /// `<=`
    pub const LE: ReldepFlags = ReldepFlags(Self::LT.0 | Self::EQ.0);
    /// `>=`
    pub const GE: ReldepFlags = ReldepFlags(Self::GT.0 | Self::EQ.0);

    /// True if `self` carries the given bit(s).
    pub fn contains(self, other: ReldepFlags) -> bool {
        self.0 & other.0 == other.0
    }

    fn union(self, other: ReldepFlags) -> ReldepFlags {
        ReldepFlags(self.0 | other.0)
    }

    /// Renders the canonical operator string (`<`, `<=`, `=`, `>=`, `>`),
    /// or `None` for [`ReldepFlags::NONE`].
    pub fn as_str(self) -> Option<&'static str> {
        match self.0 {
            0 => None,
            x if x == Self::LT.0 => Some("<"),
            x if x == Self::LE.0 => Some("<="),
            x if x == Self::EQ.0 => Some("="),
            x if x == Self::GE.0 => Some(">="),
            x if x == Self::GT.0 => Some(">"),
            _ => Some("?"),
        }
    }

    /// Evaluates whether a candidate's ordering against the reldep's EVR
    /// (`candidate.cmp(&target)`) satisfies this flag set.
    pub fn matches_ordering(self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match ordering {
            Less => self.contains(Self::LT),
            Equal => self.contains(Self::EQ),
            Greater => self.contains(Self::GT),
        }
    }
}

impl Default for ReldepFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// A parsed `name [op evr]` dependency atom (spec.md §3 Reldep). This is
/// the pool-independent representation; `pkgsack_pool` interns the name
/// into a `StringId` and the whole atom into a `ReldepId` before it
/// participates in the provides index.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Reldep {
    name: Name,
    flags: ReldepFlags,
    evr: Option<Evr>,
}

impl Reldep {
    /// Builds a bare-name reldep (satisfied by any providing EVR).
    pub fn unversioned(name: Name) -> Self {
        Self {
            name,
            flags: ReldepFlags::NONE,
            evr: None,
        }
    }

    /// Builds a versioned reldep.
    pub fn versioned(name: Name, flags: ReldepFlags, evr: Evr) -> Self {
        Self {
            name,
            flags,
            evr: Some(evr),
        }
    }

    /// The dependency name.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The comparison flags; [`ReldepFlags::NONE`] for a bare name.
    pub fn flags(&self) -> ReldepFlags {
        self.flags
    }

    /// The required EVR, if this reldep is versioned.
    pub fn evr(&self) -> Option<&Evr> {
        self.evr.as_ref()
    }

    /// Tests whether a provider's `(name, evr)` pair satisfies this reldep:
    /// same name, and (if versioned) the provider's EVR compares against
    /// ours the way our flags require (spec.md §4.4 "dep-match").
    pub fn is_satisfied_by(&self, provider_name: &str, provider_evr: Option<&Evr>) -> bool {
        if provider_name != self.name.as_str() {
            return false;
        }
        match (&self.evr, provider_evr) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(want), Some(have)) => self.flags.matches_ordering(have.cmp(want)),
        }
    }

    /// Parses a reldep string under strict rules. Per spec.md §4.4/§7,
    /// equality-mode filter callers should treat a parse failure as "empty
    /// result", not propagate this error.
    pub fn parse(s: &str) -> Option<Self> {
        parse_reldep(s).ok().map(|(_, r)| r)
    }
}

impl fmt::Display for Reldep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.flags.as_str(), &self.evr) {
            (Some(op), Some(evr)) => write!(f, "{} {} {}", self.name, op, evr),
            _ => write!(f, "{}", self.name),
        }
    }
}

fn parse_op(input: &str) -> IResult<&str, ReldepFlags> {
    alt((
        tag("<=").map(|_| ReldepFlags::LE),
        tag(">=").map(|_| ReldepFlags::GE),
        tag("<").map(|_| ReldepFlags::LT),
        tag("=").map(|_| ReldepFlags::EQ),
        tag(">").map(|_| ReldepFlags::GT),
    ))
    .parse(input)
}

fn is_name_char(c: char) -> bool {
    !c.is_whitespace()
}

fn parse_name(input: &str) -> IResult<&str, &str> {
    nom::bytes::complete::take_while1(is_name_char)(input)
}

fn parse_reldep(input: &str) -> IResult<&str, Reldep> {
    let (rest, name) = parse_name(input)?;
    let name =
        Name::new(name).map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Fail)))?;
    let (rest, versioned) = opt(preceded(
        multispace1,
        (
            terminated(parse_op, multispace0),
            nom::bytes::complete::take_while1(|c: char| !c.is_whitespace()),
        ),
    ))
    .parse(rest)?;
    let (rest, _) = terminated(multispace0, eof).parse(rest)?;
    let reldep = match versioned {
        Some((flags, evr_str)) => {
            let evr = Evr::parse(evr_str)
                .map_err(|_| nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Fail)))?;
            Reldep::versioned(name, flags, evr)
        }
        None => Reldep::unversioned(name),
    };
    Ok((rest, reldep))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name() {
        let r = Reldep::parse("foo").unwrap();
        assert_eq!(r.name().as_str(), "foo");
        assert_eq!(r.flags(), ReldepFlags::NONE);
        assert!(r.evr().is_none());
    }

    #[test]
    fn test_parse_versioned() {
        let r = Reldep::parse("foo >= 1.0-1").unwrap();
        assert_eq!(r.name().as_str(), "foo");
        assert_eq!(r.flags(), ReldepFlags::GE);
        assert_eq!(r.evr().unwrap().to_string(), "1.0-1");
    }

    #[test]
    fn test_display_roundtrip() {
        let r = Reldep::parse("kernel = 5.1-1").unwrap();
        assert_eq!(r.to_string(), "kernel = 5.1-1");
    }

    #[test]
    fn test_parse_rejects_trailing_garbage() {
        assert!(Reldep::parse("foo >= 1.0 extra").is_none());
    }

    #[test]
    fn test_is_satisfied_by_eq_matches_ge() {
        // "= 1.0" requirement satisfied by a ">= 1.0" provide relationship:
        // spec.md §4.4 example "`= 1.0` matches `>= 1.0`" is about the
        // *requirer's* flags being compatible with a provider whose own
        // declared relation is >=; from the pure EVR-ordering side this is
        // simply "candidate EVR equals required EVR".
        let want = Reldep::versioned(
            Name::new_unchecked("foo"),
            ReldepFlags::EQ,
            Evr::parse("1.0").unwrap(),
        );
        assert!(want.is_satisfied_by("foo", Some(&Evr::parse("1.0").unwrap())));
        assert!(!want.is_satisfied_by("foo", Some(&Evr::parse("1.1").unwrap())));
    }
}
