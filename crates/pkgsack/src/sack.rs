//! The sack: owns the pool and every repo, and answers the
//! excludes/includes/considered and protected/installonly/running-kernel
//! questions the rest of the workspace is built against (spec.md §3, §4.2,
//! C3).

use std::cell::RefCell;

use pkgsack_pool::{PackageSet, Pool, RepoId, SolvableId};
use pkgsack_pool::{PackageRecord, ReldepLists};
use pkgsack_query::SackView;
use pkgsack_solve::{Goal, GoalContext};
use pkgsack_types::advisory::Advisory;
use pkgsack_types::checksum::Checksum;
use pkgsack_types::evr::Evr;
use pkgsack_types::reldep::Reldep;
use tracing::{debug, instrument};

use crate::config::{LoadFlags, SackConfig};
use crate::error::SackError;
use crate::kernel;
use crate::metadata::{PackageMetadata, RepoMetadata};
use crate::package_id;

/// The synthetic repo name a command-line RPM lands in (spec.md §4.2).
pub(crate) const COMMANDLINE_REPO: &str = "@commandline";
const KERNEL_PACKAGE_NAME: &str = "kernel";

/// The package universe: pool, repos, excludes/includes, the considered
/// bitmap, protected-package and installonly policy, and advisories
/// (spec.md §3 "Sack", C3).
pub struct Sack {
    pool: Pool,
    config: SackConfig,
    excludes: PackageSet,
    includes: PackageSet,
    considered: RefCell<Option<PackageSet>>,
    protected: PackageSet,
    advisories: Vec<Advisory>,
    commandline_repo: Option<RepoId>,
}

impl Sack {
    /// An empty sack with no repos loaded.
    pub fn new(config: SackConfig) -> Self {
        Self {
            pool: Pool::new(),
            config,
            excludes: PackageSet::new(),
            includes: PackageSet::new(),
            considered: RefCell::new(None),
            protected: PackageSet::new(),
            advisories: Vec::new(),
            commandline_repo: None,
        }
    }

    /// The sack's configuration.
    pub fn config(&self) -> &SackConfig {
        &self.config
    }

    /// Loads a typed metadata bundle into a freshly created repo (spec.md
    /// §4.2). `installed` must be true for at most one call across this
    /// sack's lifetime.
    #[instrument(skip_all, fields(repo = %name.as_ref()))]
    pub fn load_repo(
        &mut self,
        name: impl AsRef<str>,
        installed: bool,
        metadata: RepoMetadata,
        flags: LoadFlags,
    ) -> Result<RepoId, SackError> {
        let repo = self.pool.new_repo(name.as_ref(), installed)?;
        for package in metadata.packages {
            self.add_package(repo, package, &flags)?;
        }
        if flags.use_updateinfo {
            self.advisories.extend(metadata.advisories);
        }
        if installed {
            self.seed_protected_from_config();
        }
        self.pool.ensure_provides_ready();
        self.dirty_considered();
        debug!(repo = %self.pool.repo(repo).name(), "repo loaded");
        Ok(repo)
    }

    /// Adds a single command-line RPM to the `@commandline` pseudo-repo,
    /// creating it on first use (spec.md §4.2).
    pub fn add_commandline_rpm(&mut self, package: PackageMetadata) -> Result<SolvableId, SackError> {
        let repo = match self.commandline_repo {
            Some(repo) => repo,
            None => {
                let repo = self.pool.new_repo(COMMANDLINE_REPO, false)?;
                self.commandline_repo = Some(repo);
                repo
            }
        };
        let id = self.add_package(repo, package, &LoadFlags::default())?;
        self.pool.ensure_provides_ready();
        self.dirty_considered();
        Ok(id)
    }

    fn add_package(&mut self, repo: RepoId, package: PackageMetadata, flags: &LoadFlags) -> Result<SolvableId, SackError> {
        let name = package.name.clone();
        let evr = Evr::new(package.epoch.unwrap_or(0), package.version, package.release);
        let reldeps = ReldepLists {
            provides: self.intern_reldeps(&package.provides)?,
            requires: self.intern_reldeps(&package.requires)?,
            obsoletes: self.intern_reldeps(&package.obsoletes)?,
            conflicts: self.intern_reldeps(&package.conflicts)?,
            enhances: self.intern_reldeps(&package.enhances)?,
            recommends: self.intern_reldeps(&package.recommends)?,
            suggests: self.intern_reldeps(&package.suggests)?,
            supplements: self.intern_reldeps(&package.supplements)?,
        };
        let record = PackageRecord {
            name,
            evr,
            arch: package.arch,
            repo,
            location: package.location,
            sourcerpm: package.sourcerpm,
            summary: package.summary,
            description: package.description,
            url: package.url,
            vendor: package.vendor,
            license: package.license,
            group: package.group,
            files: if flags.use_filelists { package.files } else { Vec::new() },
            checksum: parse_checksum(package.checksum)?,
            hdr_checksum: parse_checksum(package.hdr_checksum)?,
            install_size: package.install_size,
            download_size: package.download_size,
            build_time: package.build_time,
            install_time: package.install_time,
            from_repo: package.origin_repo,
            reldeps,
        };
        Ok(self.pool.add_solvable(record))
    }

    fn intern_reldeps(&mut self, raw: &[String]) -> Result<Vec<pkgsack_pool::ReldepId>, SackError> {
        raw.iter()
            .map(|s| {
                Reldep::parse(s)
                    .map(|r| self.pool.intern_reldep(r))
                    .ok_or_else(|| SackError::FileInvalid(format!("unparseable reldep {s:?}")))
            })
            .collect()
    }

    /// Unions `set` into the sack's excludes, invalidating `considered`
    /// (spec.md §4.2).
    pub fn add_excludes(&mut self, set: &PackageSet) {
        self.excludes.union_with(set);
        self.dirty_considered();
    }

    /// Unions `set` into the sack's includes.
    pub fn add_includes(&mut self, set: &PackageSet) {
        self.includes.union_with(set);
        self.dirty_considered();
    }

    /// Adds solvables to the protected bitmap (spec.md §4.7 step 7).
    pub fn add_protected(&mut self, set: &PackageSet) {
        self.protected.union_with(set);
    }

    fn seed_protected_from_config(&mut self) {
        let Some(installed) = self.pool.installed_repo() else { return };
        let names = self.config.protected_packages.clone();
        for id in self.pool.repo_solvables(installed).iter() {
            if let Some(record) = self.pool.solvable(id) {
                if names.iter().any(|n| n == &record.name) {
                    self.protected.insert(id);
                }
            }
        }
    }

    fn dirty_considered(&mut self) {
        *self.considered.borrow_mut() = None;
    }

    /// `name;evr;arch;reponame` for a solvable in this sack (spec.md §6).
    pub fn package_id(&self, id: SolvableId) -> Option<String> {
        let record = self.pool.solvable(id)?;
        let reponame = package_id::render_reponame(&self.pool, record.repo, record);
        Some(record.package_id(&reponame))
    }

    /// Resolves a package-id string back to the solvable it names, if any
    /// (spec.md §6 round-trip).
    pub fn resolve_package_id(&self, s: &str) -> Result<Option<SolvableId>, SackError> {
        let parsed = package_id::parse(s)?;
        let repo = self.repo_for_reponame(&parsed.reponame);
        let candidates = match repo {
            Some(repo) => self.pool.repo_solvables(repo),
            None => self.pool.universe(),
        };
        let found = candidates.iter().find(|&id| {
            self.pool.solvable(id).is_some_and(|r| {
                r.name == parsed.name && r.evr == parsed.evr && r.arch == parsed.arch
            })
        });
        Ok(found)
    }

    fn repo_for_reponame(&self, reponame: &str) -> Option<RepoId> {
        if reponame == "local" {
            return self.commandline_repo;
        }
        if reponame == "installed" || reponame.starts_with("installed:") {
            return self.pool.installed_repo();
        }
        self.pool.repos().find(|r| r.name() == reponame).map(|r| r.id())
    }

    /// Starts a goal against this sack (spec.md §4.7).
    pub fn goal(&self) -> Goal<'_, Self> {
        Goal::new(self)
    }

    /// The installed solvable for the currently running kernel, matched by
    /// `uname -r` against installed `kernel`-named packages (supplemented
    /// feature; see `crate::kernel`).
    pub fn detect_running_kernel(&self) -> Option<SolvableId> {
        let installed = self.pool.installed_repo()?;
        let release = kernel::host_kernel_release()?;
        let (version, rest) = kernel::split_release(&release)?;
        self.pool.repo_solvables(installed).iter().find(|&id| {
            let Some(record) = self.pool.solvable(id) else { return false };
            record.name == KERNEL_PACKAGE_NAME
                && record.evr.version() == version
                && rest == format!("{}.{}", record.evr.release(), record.arch)
        })
    }
}

fn parse_checksum(raw: Option<(String, String)>) -> Result<Option<Checksum>, SackError> {
    let Some((algo, hex)) = raw else { return Ok(None) };
    let checksum = match algo.as_str() {
        "md5" => Checksum::from_hex_md5(&hex),
        "sha256" => Checksum::from_hex_sha256(&hex),
        other => return Err(SackError::FileInvalid(format!("unknown checksum algorithm {other:?}"))),
    };
    checksum
        .map(Some)
        .ok_or_else(|| SackError::FileInvalid(format!("malformed {algo} checksum {hex:?}")))
}

impl SackView for Sack {
    fn pool(&self) -> &Pool {
        &self.pool
    }

    fn considered(&self) -> PackageSet {
        if let Some(cached) = self.considered.borrow().as_ref() {
            return cached.clone();
        }
        let mut set = if self.includes.is_empty() {
            self.pool.universe()
        } else {
            self.includes.clone()
        };
        set.subtract(&self.excludes);
        *self.considered.borrow_mut() = Some(set.clone());
        set
    }

    fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgsack_query::{CmpType, Selector};

    fn pkg(name: &str, version: &str, requires: Vec<&str>) -> PackageMetadata {
        PackageMetadata {
            name: name.to_string(),
            version: version.to_string(),
            release: "1".to_string(),
            arch: "x86_64".to_string(),
            requires: requires.into_iter().map(str::to_string).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_install_pulls_in_a_dependency() {
        let mut sack = Sack::new(SackConfig::default());
        sack.load_repo(
            "base",
            false,
            RepoMetadata {
                packages: vec![pkg("foo", "1.0", vec!["bar"]), pkg("bar", "1.0", vec![])],
                ..Default::default()
            },
            LoadFlags::default(),
        )
        .unwrap();

        let mut goal = sack.goal();
        goal.install(Selector::new().set_name(CmpType::EQ, "foo").unwrap());
        let transaction = goal.run().unwrap();

        let installed_names: Vec<String> = transaction
            .installed()
            .filter_map(|id| sack.pool.solvable(id).map(|r| r.name.clone()))
            .collect();
        assert!(installed_names.contains(&"foo".to_string()));
        assert!(installed_names.contains(&"bar".to_string()));
    }

    #[test]
    fn test_package_id_roundtrip_through_resolve() {
        let mut sack = Sack::new(SackConfig::default());
        sack.load_repo(
            "base",
            true,
            RepoMetadata {
                packages: vec![pkg("foo", "1.0", vec![])],
                ..Default::default()
            },
            LoadFlags::default(),
        )
        .unwrap();

        let id = sack.pool.universe().iter().next().unwrap();
        let package_id = sack.package_id(id).unwrap();
        assert_eq!(package_id, "foo;1.0-1;x86_64;installed");
        assert_eq!(sack.resolve_package_id(&package_id).unwrap(), Some(id));
    }

    #[test]
    fn test_excludes_remove_from_considered() {
        let mut sack = Sack::new(SackConfig::default());
        sack.load_repo(
            "base",
            false,
            RepoMetadata {
                packages: vec![pkg("foo", "1.0", vec![])],
                ..Default::default()
            },
            LoadFlags::default(),
        )
        .unwrap();
        assert_eq!(sack.considered().len(), 1);

        let universe = sack.pool.universe();
        sack.add_excludes(&universe);
        assert_eq!(sack.considered().len(), 0);
    }
}

impl GoalContext for Sack {
    fn installed_repo(&self) -> Option<RepoId> {
        self.pool.installed_repo()
    }

    fn protected(&self) -> &PackageSet {
        &self.protected
    }

    fn installonly_names(&self) -> &[String] {
        &self.config.installonly_names
    }

    fn installonly_limit(&self) -> u32 {
        self.config.installonly_limit
    }

    fn running_kernel(&self) -> Option<SolvableId> {
        self.detect_running_kernel()
    }
}
