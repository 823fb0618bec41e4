//! `PackageRecord`: every attribute spec.md §3 says a solvable carries.
//!
//! Grounded on `rattler_conda_types::PackageRecord` — a flat, owned struct
//! of metadata fields, with the identity-bearing fields (name, evr, arch)
//! also available pre-parsed for the matchers in `pkgsack_query`.

use pkgsack_types::checksum::Checksum;
use pkgsack_types::evr::Evr;

use crate::ids::{ReldepId, RepoId};

/// The eight reldep-list attributes a package carries (spec.md §3, §4.4).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReldepLists {
    /// What this package provides.
    pub provides: Vec<ReldepId>,
    /// What this package requires.
    pub requires: Vec<ReldepId>,
    /// What this package obsoletes.
    pub obsoletes: Vec<ReldepId>,
    /// What this package conflicts with.
    pub conflicts: Vec<ReldepId>,
    /// What this package enhances.
    pub enhances: Vec<ReldepId>,
    /// What this package recommends.
    pub recommends: Vec<ReldepId>,
    /// What this package suggests.
    pub suggests: Vec<ReldepId>,
    /// What this package supplements.
    pub supplements: Vec<ReldepId>,
}

/// A single package record: the unit of data a [`crate::Pool`] stores per
/// [`crate::SolvableId`] (spec.md §3 "Package attributes").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Package name.
    pub name: String,
    /// Epoch:version-release.
    pub evr: Evr,
    /// Architecture, e.g. `x86_64`, `noarch`.
    pub arch: String,
    /// The repo this solvable belongs to.
    pub repo: RepoId,
    /// Repo-relative path to the package file, if any (absent for the
    /// `@System`/installed pseudo-repo in some setups).
    pub location: Option<String>,
    /// Source RPM filename this binary package was built from.
    pub sourcerpm: Option<String>,
    /// One-line summary.
    pub summary: String,
    /// Full description.
    pub description: String,
    /// Upstream project URL.
    pub url: Option<String>,
    /// Vendor string.
    pub vendor: Option<String>,
    /// License string.
    pub license: Option<String>,
    /// Package group/category.
    pub group: Option<String>,
    /// Files this package installs, for `Query::filter_file`.
    pub files: Vec<String>,
    /// Checksum of the package payload.
    pub checksum: Option<Checksum>,
    /// Checksum of the package header/metadata blob.
    pub hdr_checksum: Option<Checksum>,
    /// Installed size in bytes.
    pub install_size: u64,
    /// Download (archive) size in bytes.
    pub download_size: u64,
    /// Unix build time.
    pub build_time: i64,
    /// Unix install time; `None` for packages that are not installed.
    pub install_time: Option<i64>,
    /// For an installed solvable, the name of the repo it was originally
    /// installed from (rpmdb's `yumdb` `from_repo` field); `None` when
    /// unrecorded or for a non-installed solvable.
    pub from_repo: Option<String>,
    /// The eight reldep lists.
    pub reldeps: ReldepLists,
}

impl PackageRecord {
    /// Canonical `name-[epoch:]version-release.arch` rendering (spec.md §6).
    pub fn nevra(&self) -> pkgsack_types::nevra::Nevra {
        pkgsack_types::nevra::Nevra::new(self.name.clone(), self.evr.clone(), self.arch.clone())
    }

    /// `name;evr;arch;reponame` package-id string (spec.md §6), given the
    /// resolved repo name (the record itself only knows [`RepoId`]).
    pub fn package_id(&self, reponame: &str) -> String {
        format!("{};{};{};{}", self.name, self.evr, self.arch, reponame)
    }
}
