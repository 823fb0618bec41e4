//! Advisory (errata) records (spec.md §4.8, §6).

use chrono::{DateTime, Utc};

use crate::evr::Evr;

/// The kind of advisory (security, bugfix, enhancement, ...). RPM/DNF
/// ecosystems use a small open set of these; unrecognized values from
/// metadata round-trip through [`AdvisoryKind::Other`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum AdvisoryKind {
    /// A security fix.
    Security,
    /// A bug fix.
    Bugfix,
    /// A feature enhancement.
    Enhancement,
    /// A newpackage advisory.
    NewPackage,
    /// Any other kind string as found in metadata.
    Other(String),
}

impl AdvisoryKind {
    /// Parses the kind string as found in updateinfo metadata.
    pub fn parse(s: &str) -> Self {
        match s {
            "security" => AdvisoryKind::Security,
            "bugfix" => AdvisoryKind::Bugfix,
            "enhancement" => AdvisoryKind::Enhancement,
            "newpackage" => AdvisoryKind::NewPackage,
            other => AdvisoryKind::Other(other.to_string()),
        }
    }
}

/// Advisory severity, ordered from least to most severe only within
/// `Critical`/`Important`/`Moderate`/`Low`; `Unspecified` carries no
/// ordering guarantee and is never assumed comparable by callers.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum AdvisorySeverity {
    /// No severity recorded.
    Unspecified,
    /// Low severity.
    Low,
    /// Moderate severity.
    Moderate,
    /// Important severity.
    Important,
    /// Critical severity.
    Critical,
}

/// One `(name, evr, arch, filename)` tuple referenced by an advisory's
/// update collection (spec.md §6).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AdvisoryPackage {
    /// The package name.
    pub name: String,
    /// The package EVR.
    pub evr: Evr,
    /// The package architecture.
    pub arch: String,
    /// The filename as recorded in the advisory, not necessarily the same
    /// as the package's actual repo-relative location.
    pub filename: String,
}

/// A parsed errata/advisory record.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    /// The advisory identifier, e.g. `RHSA-2024:1234`.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Full description text.
    pub description: String,
    /// Rights/license text associated with the advisory.
    pub rights: String,
    /// Last-updated timestamp.
    pub updated: DateTime<Utc>,
    /// The advisory kind.
    pub kind: AdvisoryKind,
    /// The advisory severity.
    pub severity: AdvisorySeverity,
    /// Referenced bug tracker ids.
    pub bugs: Vec<String>,
    /// Referenced CVE ids.
    pub cves: Vec<String>,
    /// The packages this advisory updates.
    pub packages: Vec<AdvisoryPackage>,
}
