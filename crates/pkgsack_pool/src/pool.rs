//! The pool: solvable arena, string/reldep interning and the lazily-built
//! provides index (spec.md §4.1 C1).
//!
//! Grounded on `rattler_solve::libsolv_c::wrapper::pool::Pool`, which wraps
//! libsolv's `Pool` — a single arena all repos/solvables/reldeps live in,
//! with a "make provides ready" pass that must run before any dependency
//! lookup is valid. Here that pass is `Pool::ensure_provides_ready`.

use std::collections::HashMap;

use indexmap::IndexSet;
use pkgsack_types::reldep::Reldep;
use tracing::debug;

use crate::error::PoolError;
use crate::ids::{ReldepId, RepoId, SolvableId};
use crate::interner::Interner;
use crate::package_set::PackageSet;
use crate::record::PackageRecord;
use crate::repo::Repo;

/// The pool: owns every solvable, repo and interned reldep in a sack.
#[derive(Debug, Default)]
pub struct Pool {
    strings: Interner,
    reldeps: IndexSet<Reldep>,
    // Index 0 is a sentinel; real solvables start at index 1 (see
    // `SolvableId::from_index`).
    solvables: Vec<Option<PackageRecord>>,
    repos: Vec<Repo>,
    installed_repo: Option<RepoId>,
    provides_index: Option<HashMap<ReldepId, Vec<SolvableId>>>,
}

impl Pool {
    /// An empty pool with a reserved sentinel solvable slot.
    pub fn new() -> Self {
        Self {
            solvables: vec![None],
            ..Default::default()
        }
    }

    /// Creates a new repo. `installed` must be true for at most one repo
    /// per pool (spec.md §3 invariant).
    pub fn new_repo(&mut self, name: impl Into<String>, installed: bool) -> Result<RepoId, PoolError> {
        let name = name.into();
        if installed {
            if let Some(existing) = self.installed_repo {
                let existing_name = self.repo(existing).name().to_string();
                return Err(PoolError::MultipleInstalledRepos(name, existing_name));
            }
        }
        let id = RepoId(self.repos.len() as u32);
        self.repos.push(Repo::new(id, name, installed));
        if installed {
            self.installed_repo = Some(id);
        }
        Ok(id)
    }

    /// Looks up a repo by id.
    pub fn repo(&self, id: RepoId) -> &Repo {
        &self.repos[id.0 as usize]
    }

    /// Iterates over every repo in the pool.
    pub fn repos(&self) -> impl Iterator<Item = &Repo> {
        self.repos.iter()
    }

    /// The pool's installed repo, if one has been added.
    pub fn installed_repo(&self) -> Option<RepoId> {
        self.installed_repo
    }

    /// Adds a solvable to the given repo and returns its freshly-minted id.
    /// Invalidates the provides index (spec.md §4.1: any arena mutation
    /// dirties the index until the next `ensure_provides_ready`).
    pub fn add_solvable(&mut self, record: PackageRecord) -> SolvableId {
        let id = SolvableId::from_index(self.solvables.len());
        self.solvables.push(Some(record));
        self.provides_index = None;
        id
    }

    /// Looks up a solvable's record.
    pub fn solvable(&self, id: SolvableId) -> Option<&PackageRecord> {
        self.solvables.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// A set containing every live solvable in the pool (spec.md §4.4
    /// "Query starts from the universe of all packages known to the
    /// sack").
    pub fn universe(&self) -> PackageSet {
        (1..self.solvables.len())
            .filter(|&idx| self.solvables[idx].is_some())
            .map(SolvableId::from_index)
            .collect()
    }

    /// Every solvable belonging to the given repo.
    pub fn repo_solvables(&self, repo: RepoId) -> PackageSet {
        (1..self.solvables.len())
            .filter(|&idx| matches!(&self.solvables[idx], Some(r) if r.repo == repo))
            .map(SolvableId::from_index)
            .collect()
    }

    /// Interns a string, returning its id.
    pub fn intern_str(&mut self, s: &str) -> crate::ids::StringId {
        self.strings.intern(s)
    }

    /// Resolves an interned string id back to its text.
    pub fn resolve_str(&self, id: crate::ids::StringId) -> &str {
        self.strings.resolve(id)
    }

    /// Interns a reldep atom, deduplicating structurally identical ones.
    pub fn intern_reldep(&mut self, reldep: Reldep) -> ReldepId {
        let (idx, _) = self.reldeps.insert_full(reldep);
        self.provides_index = None;
        ReldepId(idx as u32)
    }

    /// Resolves an interned reldep id back to its atom.
    pub fn resolve_reldep(&self, id: ReldepId) -> &Reldep {
        self.reldeps
            .get_index(id.0 as usize)
            .expect("ReldepId minted by this pool must resolve")
    }

    /// Looks up the id of an already-interned reldep, without interning it
    /// (readers such as `pkgsack_query` never mutate the pool).
    pub fn lookup_reldep(&self, reldep: &Reldep) -> Option<ReldepId> {
        self.reldeps.get_index_of(reldep).map(|idx| ReldepId(idx as u32))
    }

    /// Every interned reldep, with its id.
    pub fn reldeps(&self) -> impl Iterator<Item = (ReldepId, &Reldep)> {
        self.reldeps
            .iter()
            .enumerate()
            .map(|(idx, reldep)| (ReldepId(idx as u32), reldep))
    }

    /// Builds (or rebuilds, if dirty) the provides index: for every
    /// interned reldep, every solvable whose `provides` list contains it.
    /// Idempotent and safe to call repeatedly (spec.md §4.1 "make provides
    /// ready").
    pub fn ensure_provides_ready(&mut self) {
        if self.provides_index.is_some() {
            return;
        }
        debug!(reldeps = self.reldeps.len(), "rebuilding provides index");
        let mut index: HashMap<ReldepId, Vec<SolvableId>> = HashMap::new();
        for (slot_idx, slot) in self.solvables.iter().enumerate() {
            let Some(record) = slot else { continue };
            let solvable_id = SolvableId::from_index(slot_idx);
            for &reldep_id in &record.reldeps.provides {
                index.entry(reldep_id).or_default().push(solvable_id);
            }
        }
        self.provides_index = Some(index);
    }

    /// Every solvable providing the given reldep id. Panics if
    /// [`Pool::ensure_provides_ready`] has not been called since the last
    /// mutation; callers that only read through `pkgsack_query` never hit
    /// this because the query engine always readies the index first.
    pub fn providers_of(&self, reldep: ReldepId) -> &[SolvableId] {
        self.provides_index
            .as_ref()
            .expect("call ensure_provides_ready before providers_of")
            .get(&reldep)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use pkgsack_types::evr::Evr;
    use pkgsack_types::name::Name;

    use super::*;
    use crate::record::ReldepLists;

    fn record(name: &str, repo: RepoId, provides: Vec<ReldepId>) -> PackageRecord {
        PackageRecord {
            name: name.to_string(),
            evr: Evr::version_only("1.0"),
            arch: "x86_64".to_string(),
            repo,
            location: None,
            sourcerpm: None,
            summary: String::new(),
            description: String::new(),
            url: None,
            vendor: None,
            license: None,
            group: None,
            files: Vec::new(),
            checksum: None,
            hdr_checksum: None,
            install_size: 0,
            download_size: 0,
            build_time: 0,
            install_time: None,
            from_repo: None,
            reldeps: ReldepLists {
                provides,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_single_installed_repo_invariant() {
        let mut pool = Pool::new();
        pool.new_repo("@System", true).unwrap();
        let err = pool.new_repo("@System2", true).unwrap_err();
        assert!(matches!(err, PoolError::MultipleInstalledRepos(_, _)));
    }

    #[test]
    fn test_add_solvable_and_universe() {
        let mut pool = Pool::new();
        let repo = pool.new_repo("fedora", false).unwrap();
        let a = pool.add_solvable(record("a", repo, vec![]));
        let b = pool.add_solvable(record("b", repo, vec![]));
        let universe = pool.universe();
        assert!(universe.contains(a));
        assert!(universe.contains(b));
        assert_eq!(universe.len(), 2);
    }

    #[test]
    fn test_provides_index_roundtrip() {
        let mut pool = Pool::new();
        let repo = pool.new_repo("fedora", false).unwrap();
        let reldep = Reldep::unversioned(Name::new("libfoo").unwrap());
        let reldep_id = pool.intern_reldep(reldep);
        let solvable = pool.add_solvable(record("libfoo-pkg", repo, vec![reldep_id]));
        pool.ensure_provides_ready();
        assert_eq!(pool.providers_of(reldep_id), &[solvable]);
    }

    #[test]
    fn test_provides_index_invalidated_on_mutation() {
        let mut pool = Pool::new();
        let repo = pool.new_repo("fedora", false).unwrap();
        let reldep = Reldep::unversioned(Name::new("libfoo").unwrap());
        let reldep_id = pool.intern_reldep(reldep);
        pool.ensure_provides_ready();
        assert!(pool.providers_of(reldep_id).is_empty());
        pool.add_solvable(record("libfoo-pkg", repo, vec![reldep_id]));
        pool.ensure_provides_ready();
        assert_eq!(pool.providers_of(reldep_id).len(), 1);
    }

    #[test]
    fn test_intern_str_dedupes() {
        let mut pool = Pool::new();
        let a = pool.intern_str("noarch");
        let b = pool.intern_str("noarch");
        assert_eq!(a, b);
        assert_eq!(pool.resolve_str(a), "noarch");
    }
}
