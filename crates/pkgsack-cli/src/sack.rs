//! Builds a [`pkgsack::Sack`] from the `--repo`/`--installed`/`--config`
//! flags shared by every subcommand.
//!
//! The core has no disk I/O of its own (spec.md §1 Non-goals); this module
//! is the repo-loader collaborator spec.md §6 describes, reading plain
//! JSON dumps of [`pkgsack::RepoMetadata`] the way `rattler-bin` reads
//! `repodata.json` via `rattler_repodata_gateway`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pkgsack::{LoadFlags, RepoMetadata, Sack, SackConfig};

/// One `name=path.json` repo argument.
pub fn parse_repo_arg(s: &str) -> Result<(String, String)> {
    let (name, path) = s
        .split_once('=')
        .with_context(|| format!("expected NAME=PATH, got {s:?}"))?;
    Ok((name.to_string(), path.to_string()))
}

fn load_metadata(path: &str) -> Result<RepoMetadata> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path} as repo metadata"))
}

/// Loads a [`SackConfig`] from `path` if given, else the default config.
pub fn load_config(path: Option<&Path>) -> Result<SackConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Ok(SackConfig::from_toml(&text)?)
        }
        None => Ok(SackConfig::default()),
    }
}

/// Builds a sack from repeated `name=path` repo arguments and an optional
/// installed-set snapshot, all as JSON [`RepoMetadata`] dumps.
pub fn build_sack(config: SackConfig, repos: &[String], installed: Option<&Path>) -> Result<Sack> {
    let mut sack = Sack::new(config);

    if let Some(path) = installed {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let metadata: RepoMetadata =
            serde_json::from_str(&text).with_context(|| format!("parsing {} as repo metadata", path.display()))?;
        sack.load_repo("@System", true, metadata, LoadFlags::default())?;
    }

    for arg in repos {
        let (name, path) = parse_repo_arg(arg)?;
        let metadata = load_metadata(&path)?;
        sack.load_repo(name, false, metadata, LoadFlags::default())?;
    }

    Ok(sack)
}
