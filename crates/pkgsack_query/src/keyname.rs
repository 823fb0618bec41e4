//! The package attributes a filter may name (spec.md §4.4 allowed-keys
//! table).

use crate::cmp::CmpType;
use crate::error::QueryError;

/// One of the package attributes a [`crate::Filter`] can test.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Keyname {
    /// Package name. Free string key: EQ/SUBSTR/GLOB/ICASE.
    Name,
    /// Architecture. Free string key.
    Arch,
    /// `epoch:version-release` rendering. Free string key.
    Evr,
    /// One-line summary. Free string key.
    Summary,
    /// Full description. Free string key.
    Description,
    /// Upstream URL. Free string key.
    Url,
    /// Installed file path; matches walk the complete filelist.
    File,
    /// Owning repo's name. Free string key.
    Reponame,
    /// Canonical `name-[epoch:]version-release.arch` rendering.
    Nevra,
    /// Version component. EVR-ordered key: EQ/GLOB(raw segment)/LT/GT.
    Version,
    /// Release component. EVR-ordered key.
    Release,
    /// Epoch component. EVR-ordered/numeric key.
    Epoch,
    /// Repo-relative package location. Identity key: EQ only.
    Location,
    /// Source RPM filename. Identity key: EQ only.
    Sourcerpm,
    /// What the package provides. Reldep key: EQ (as reldep) / GLOB (by name).
    Provides,
    /// What the package requires. Reldep key.
    Requires,
    /// What the package obsoletes. Reldep key.
    Obsoletes,
    /// What the package conflicts with. Reldep key.
    Conflicts,
    /// What the package enhances. Reldep key.
    Enhances,
    /// What the package recommends. Reldep key.
    Recommends,
    /// What the package suggests. Reldep key.
    Suggests,
    /// What the package supplements. Reldep key.
    Supplements,
    /// Direct package-set membership. Set key: EQ/NEQ.
    Pkg,
    /// Package-set membership via an obsoletes relationship. Set key.
    ObsoletesPkg,
    /// Advisory id. Advisory key: EQ only.
    Advisory,
    /// Referenced bug id. Advisory key.
    AdvisoryBug,
    /// Referenced CVE id. Advisory key.
    AdvisoryCve,
    /// Advisory kind (security/bugfix/...). Advisory key.
    AdvisoryType,
    /// Advisory severity. Advisory key.
    AdvisorySeverity,
}

/// The class of allowed `(cmp, match-type)` combinations a keyname falls
/// into (spec.md §4.4 table).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyClass {
    /// `name, arch, evr, summary, description, url, file, reponame, nevra`.
    FreeString,
    /// `version, release, epoch`.
    EvrOrdered,
    /// `location, sourcerpm`.
    Identity,
    /// the eight reldep lists.
    Reldep,
    /// `pkg`, `obsoletes(pkg)`.
    Set,
    /// `advisory*`.
    Advisory,
}

impl Keyname {
    /// The allowed-keys class this key belongs to.
    pub fn class(self) -> KeyClass {
        use Keyname::*;
        match self {
            Name | Arch | Evr | Summary | Description | Url | File | Reponame | Nevra => KeyClass::FreeString,
            Version | Release | Epoch => KeyClass::EvrOrdered,
            Location | Sourcerpm => KeyClass::Identity,
            Provides | Requires | Obsoletes | Conflicts | Enhances | Recommends | Suggests | Supplements => {
                KeyClass::Reldep
            }
            Pkg | ObsoletesPkg => KeyClass::Set,
            Advisory | AdvisoryBug | AdvisoryCve | AdvisoryType | AdvisorySeverity => KeyClass::Advisory,
        }
    }

    /// Validates that `cmp`'s base comparator is allowed for this key
    /// (spec.md §4.4 allowed-keys table), returning `BAD_QUERY` otherwise.
    /// This runs at filter-add time, not apply time (spec.md §7).
    pub fn validate_cmp(self, cmp: CmpType) -> Result<(), QueryError> {
        let Some(base) = cmp.base() else {
            return Err(QueryError::BadQuery(format!(
                "{self:?}: more than one base comparator set"
            )));
        };
        let allowed = match self.class() {
            KeyClass::FreeString => base == CmpType::EQ || base == CmpType::SUBSTR || base == CmpType::GLOB,
            KeyClass::EvrOrdered => {
                base == CmpType::EQ || base == CmpType::LT || base == CmpType::GT || base == CmpType::GLOB
            }
            KeyClass::Identity => base == CmpType::EQ,
            KeyClass::Reldep => base == CmpType::EQ || base == CmpType::GLOB,
            KeyClass::Set => base == CmpType::EQ,
            KeyClass::Advisory => base == CmpType::EQ,
        };
        if allowed {
            Ok(())
        } else {
            Err(QueryError::BadQuery(format!(
                "{self:?}: comparator not allowed for this key"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_rejects_substr() {
        assert!(Keyname::Location.validate_cmp(CmpType::SUBSTR).is_err());
        assert!(Keyname::Location.validate_cmp(CmpType::EQ).is_ok());
    }

    #[test]
    fn test_evr_ordered_allows_lt_gt() {
        assert!(Keyname::Version.validate_cmp(CmpType::LT).is_ok());
        assert!(Keyname::Epoch.validate_cmp(CmpType::GT).is_ok());
    }

    #[test]
    fn test_free_string_rejects_lt() {
        assert!(Keyname::Name.validate_cmp(CmpType::LT).is_err());
    }
}
