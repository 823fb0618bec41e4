//! Pre-parsed repo metadata, the external interface a repo-loader
//! collaborator supplies (spec.md §6 "Repo metadata input"). The core
//! parses none of this from disk itself (spec.md §1 Non-goals); it only
//! turns already-typed records into interned solvables.

use pkgsack_types::advisory::Advisory;
use serde::Deserialize;

/// One primary-metadata package record, plus whatever optional filelists
/// entry the loader attached (spec.md §6 "primary"/"filelists"). Derives
/// [`Deserialize`] so a loader collaborator can hand these in as JSON, the
/// way the teacher's `RepoDataRecord` does for `repodata.json`.
#[pkgsack_macros::sorted]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PackageMetadata {
    /// The package's architecture.
    pub arch: String,
    /// Build time, Unix seconds.
    pub build_time: i64,
    /// Payload checksum, as `(algorithm, hex digest)`; algorithm is
    /// `"md5"` or `"sha256"`.
    pub checksum: Option<(String, String)>,
    /// What this package conflicts with, as raw reldep strings.
    pub conflicts: Vec<String>,
    /// Full description text.
    pub description: String,
    /// Download (archive) size in bytes.
    pub download_size: u64,
    /// What this package enhances.
    pub enhances: Vec<String>,
    /// Package epoch; absent means 0.
    pub epoch: Option<u32>,
    /// Repo-relative path to the full file list, resolved by the loader;
    /// empty unless [`crate::config::LoadFlags::use_filelists`] was set.
    pub files: Vec<String>,
    /// Package group/category.
    pub group: Option<String>,
    /// Header/metadata-blob checksum, same shape as `checksum`.
    pub hdr_checksum: Option<(String, String)>,
    /// Installed size in bytes.
    pub install_size: u64,
    /// Unix install time; only meaningful for the installed-set snapshot.
    pub install_time: Option<i64>,
    /// License string.
    pub license: Option<String>,
    /// Repo-relative path to the package file.
    pub location: Option<String>,
    /// Package name.
    pub name: String,
    /// What this package obsoletes.
    pub obsoletes: Vec<String>,
    /// For an installed-set entry, the repo it was originally installed
    /// from (`yumdb`'s `from_repo`).
    pub origin_repo: Option<String>,
    /// What this package provides.
    pub provides: Vec<String>,
    /// What this package recommends.
    pub recommends: Vec<String>,
    /// Package release.
    pub release: String,
    /// What this package requires.
    pub requires: Vec<String>,
    /// Source RPM filename.
    pub sourcerpm: Option<String>,
    /// What this package suggests.
    pub suggests: Vec<String>,
    /// One-line summary.
    pub summary: String,
    /// What this package supplements.
    pub supplements: Vec<String>,
    /// Upstream URL.
    pub url: Option<String>,
    /// Vendor string.
    pub vendor: Option<String>,
    /// Package version.
    pub version: String,
}

/// A whole repo's worth of pre-parsed metadata (spec.md §4.2 "typed
/// metadata bundle"). `prestodelta` is accepted for parity with the real
/// input shape but never read (spec.md §4.2: "not used by the core beyond
/// being loaded").
#[pkgsack_macros::sorted]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepoMetadata {
    /// Updateinfo advisory records, parsed only when
    /// [`crate::config::LoadFlags::use_updateinfo`] is set. Not
    /// deserializable from the same JSON document a [`PackageMetadata`]
    /// list is; always empty when `RepoMetadata` is loaded from JSON.
    #[serde(skip)]
    pub advisories: Vec<Advisory>,
    /// Primary package records.
    pub packages: Vec<PackageMetadata>,
    /// Opaque prestodelta payload; loaded, never inspected.
    pub prestodelta: Vec<u8>,
}
