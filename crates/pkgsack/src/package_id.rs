//! `name;evr;arch;reponame` package-id strings (spec.md §6), including the
//! reponame-rewriting rules a raw [`pkgsack_pool::PackageRecord`] doesn't
//! know how to apply on its own.

use pkgsack_pool::{PackageRecord, Pool, RepoId};
use pkgsack_types::evr::Evr;

use crate::error::SackError;
use crate::sack::COMMANDLINE_REPO;

/// The reponame component of a package-id string for a solvable in `repo`,
/// applying spec.md §6's rewriting rules: `installed`/`installed:<origin>`
/// for the installed repo, `local` for `@commandline`, the repo name
/// otherwise.
pub(crate) fn render_reponame(pool: &Pool, repo: RepoId, record: &PackageRecord) -> String {
    if pool.installed_repo() == Some(repo) {
        match &record.from_repo {
            Some(origin) => format!("installed:{origin}"),
            None => "installed".to_string(),
        }
    } else if pool.repo(repo).name() == COMMANDLINE_REPO {
        "local".to_string()
    } else {
        pool.repo(repo).name().to_string()
    }
}

/// The parsed components of a package-id string.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParsedPackageId {
    /// Package name.
    pub name: String,
    /// Package EVR.
    pub evr: Evr,
    /// Package architecture.
    pub arch: String,
    /// The reponame component, verbatim (still `installed`, `local`, etc;
    /// `crate::Sack::resolve_package_id` is what maps it back to a
    /// [`RepoId`]).
    pub reponame: String,
}

/// Parses a `name;evr;arch;reponame` string (spec.md §6, exact form).
pub fn parse(s: &str) -> Result<ParsedPackageId, SackError> {
    let parts: Vec<&str> = s.split(';').collect();
    let [name, evr, arch, reponame] = parts.as_slice() else {
        return Err(SackError::BadPackageId(s.to_string()));
    };
    if name.is_empty() || arch.is_empty() || reponame.is_empty() {
        return Err(SackError::BadPackageId(s.to_string()));
    }
    let evr = Evr::parse(evr).map_err(|_| SackError::BadPackageId(s.to_string()))?;
    Ok(ParsedPackageId {
        name: name.to_string(),
        evr,
        arch: arch.to_string(),
        reponame: reponame.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let parsed = parse("kernel;5.14.0-362.el9;x86_64;installed").unwrap();
        assert_eq!(parsed.name, "kernel");
        assert_eq!(parsed.arch, "x86_64");
        assert_eq!(parsed.reponame, "installed");
        assert_eq!(parsed.evr.version(), "5.14.0");
    }

    #[test]
    fn test_parse_installed_with_origin() {
        let parsed = parse("foo;1-1;noarch;installed:fedora").unwrap();
        assert_eq!(parsed.reponame, "installed:fedora");
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        assert!(parse("foo;1-1;noarch").is_err());
        assert!(parse("foo;1-1;noarch;local;extra").is_err());
    }

    #[test]
    fn test_rejects_bad_evr() {
        assert!(parse("foo;;noarch;local").is_err());
    }
}
