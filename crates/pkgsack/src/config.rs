//! Sack configuration (spec.md §3 C3), loadable from TOML the way the
//! teacher's `RepoDataRecord`/`ChannelConfig` types derive [`serde`].

use serde::Deserialize;

use crate::error::SackError;

/// Which optional metadata sections a repo load should parse (spec.md
/// §4.2).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadFlags {
    /// Parse the filelists section, populating `PackageRecord::files`.
    pub use_filelists: bool,
    /// Parse the prestodelta section. Loaded but otherwise unused by the
    /// core (spec.md §4.2).
    pub use_presto: bool,
    /// Parse the updateinfo section into the sack's advisory list.
    pub use_updateinfo: bool,
    /// Build and persist a metadata cache for this repo. The core has no
    /// disk I/O of its own (spec.md §1 Non-goals); this flag is accepted
    /// and surfaced to the repo-loader collaborator but has no effect here.
    pub build_cache: bool,
}

impl Default for LoadFlags {
    fn default() -> Self {
        Self {
            use_filelists: false,
            use_presto: false,
            use_updateinfo: false,
            build_cache: false,
        }
    }
}

/// Sack-wide configuration (spec.md §3 C3: "arch, cache dir, installonly
/// list and limit").
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SackConfig {
    /// The sack's base architecture, used by callers to pick compatible
    /// repos/packages; the core itself does not enforce an arch lattice
    /// (spec.md §4.6).
    pub arch: String,
    /// Directory the repo-loader collaborator caches metadata under. Not
    /// read or written by this core.
    pub cachedir: String,
    /// Root directory the installed-set snapshot was taken relative to.
    /// Not read or written by this core.
    pub rootdir: String,
    /// Package names allowed to have more than one simultaneously
    /// installed version (spec.md §4.7 step 2 `MULTIVERSION`).
    pub installonly_names: Vec<String>,
    /// Maximum simultaneously-installed versions per installonly name; `0`
    /// means unlimited (spec.md §4.7 step 5).
    pub installonly_limit: u32,
    /// Package names seeded into the protected bitmap at sack construction
    /// (spec.md §4.7 step 7); callers may still add more via
    /// [`crate::Sack::add_protected`].
    pub protected_packages: Vec<String>,
}

impl Default for SackConfig {
    fn default() -> Self {
        Self {
            arch: "x86_64".to_string(),
            cachedir: String::new(),
            rootdir: "/".to_string(),
            installonly_names: Vec::new(),
            installonly_limit: 0,
            protected_packages: Vec::new(),
        }
    }
}

impl SackConfig {
    /// Parses a TOML document into a config, falling back to
    /// [`SackConfig::default`] for any field it omits.
    pub fn from_toml(s: &str) -> Result<Self, SackError> {
        toml::from_str(s).map_err(|e| SackError::BadConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_partial_config() {
        let cfg = SackConfig::from_toml(
            r#"
            arch = "aarch64"
            installonly_names = ["kernel"]
            installonly_limit = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.arch, "aarch64");
        assert_eq!(cfg.installonly_names, vec!["kernel".to_string()]);
        assert_eq!(cfg.installonly_limit, 3);
        assert_eq!(cfg.rootdir, "/");
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(SackConfig::from_toml("not = [valid").is_err());
    }
}
