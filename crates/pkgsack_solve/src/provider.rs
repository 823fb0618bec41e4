//! Bridges a [`pkgsack_pool::Pool`] to [`resolvo`]'s `DependencyProvider`.
//!
//! Grounded on `rattler_solve::resolvo::CondaDependencyProvider`: a
//! `resolvo::Pool` is built once from the full candidate universe, a
//! `HashMap<NameId, Candidates>` precomputes the per-name candidate lists,
//! and `get_dependencies` turns each solvable's dependency lists into
//! interned version sets on demand. Where the conda provider interns
//! `MatchSpec` strings, this one interns [`Reldep`] values directly — the
//! pool-independent form `pkgsack_types` already gives us. Conflicts and
//! obsoletes are deliberately not modeled as resolvo clauses (resolvo 0.10
//! has no negative/mutual-exclusion constraint, only requirements and soft
//! `constrains`); `Goal::run` checks them against the solved set instead.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use pkgsack_pool::{PackageRecord, Pool, SolvableId};
use pkgsack_types::reldep::Reldep;
use resolvo::{Candidates, Dependencies, DependencyProvider, NameId, SolverCache, VersionSet, VersionSetId};

/// A [`Reldep`] used as a resolvo version set: it "contains" exactly the
/// solvables whose `(name, evr)` satisfy it (spec.md §4.4 dep-match).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) struct ReldepVersionSet<'a>(pub(crate) Reldep, PhantomData<&'a ()>);

impl<'a> ReldepVersionSet<'a> {
    pub(crate) fn new(reldep: Reldep) -> Self {
        Self(reldep, PhantomData)
    }
}

impl fmt::Display for ReldepVersionSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One candidate solvable as resolvo sees it: our own id plus a borrow of
/// its record, so `VersionSet::contains` needs no separate pool lookup.
#[derive(Clone, Copy)]
pub(crate) struct SackSolvable<'a> {
    pub(crate) id: SolvableId,
    pub(crate) record: &'a PackageRecord,
}

impl PartialEq for SackSolvable<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for SackSolvable<'_> {}
impl PartialOrd for SackSolvable<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for SackSolvable<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for SackSolvable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.record.nevra())
    }
}

impl<'a> VersionSet for ReldepVersionSet<'a> {
    type V = SackSolvable<'a>;

    fn contains(&self, v: &Self::V) -> bool {
        self.0.is_satisfied_by(&v.record.name, Some(&v.record.evr))
    }
}

/// How a name's currently-installed solvable(s) should bias the solve when
/// no job targets that name directly (spec.md §4.7 step 2 `ALLOWUNINSTALL`).
#[derive(Debug, Clone, Copy)]
pub(crate) enum Disposition {
    /// This name gets an explicit pinned root requirement in addition to
    /// this hint: the default for any installed, non-job-targeted,
    /// non-installonly name, unless it's unprotected and the caller passed
    /// `ALLOW_UNINSTALL`. Keeps the solver from silently dropping untouched
    /// packages as a side effect of an unrelated change.
    Locked(SolvableId),
    /// Bias the solver toward this solvable without requiring it. Used only
    /// for unprotected names under `ALLOW_UNINSTALL`: the package stays
    /// unless something it depends on is no longer available, in which case
    /// it's free to drop out rather than block the solve.
    Favored(SolvableId),
}

/// Dependency provider over one sack's considered universe.
pub(crate) struct GoalProvider<'a> {
    sack_pool: &'a Pool,
    pool: resolvo::Pool<ReldepVersionSet<'a>, String>,
    candidates: HashMap<NameId, Candidates>,
    name_ids: RefCell<HashMap<String, NameId>>,
    version_sets: RefCell<HashMap<Reldep, VersionSetId>>,
    ignore_weak_deps: bool,
}

impl<'a> GoalProvider<'a> {
    /// Interns every solvable in `universe`, grouping candidates by package
    /// name and applying the precomputed per-name disposition.
    pub(crate) fn build(
        sack_pool: &'a Pool,
        universe: impl IntoIterator<Item = SolvableId>,
        dispositions: &HashMap<String, Disposition>,
        ignore_weak_deps: bool,
    ) -> Self {
        let pool = resolvo::Pool::default();
        let mut candidates: HashMap<NameId, Candidates> = HashMap::new();
        let mut name_ids: HashMap<String, NameId> = HashMap::new();

        for id in universe {
            let Some(record) = sack_pool.solvable(id) else { continue };
            let name_id = *name_ids
                .entry(record.name.clone())
                .or_insert_with(|| pool.intern_package_name(record.name.clone()));
            let resolvo_id = pool.intern_solvable(name_id, SackSolvable { id, record });
            candidates.entry(name_id).or_default().candidates.push(resolvo_id);
        }

        for (name, disposition) in dispositions {
            let Some(&name_id) = name_ids.get(name) else { continue };
            let entry = candidates.entry(name_id).or_default();
            let target = match *disposition {
                Disposition::Locked(id) => id,
                Disposition::Favored(id) => id,
            };
            let resolved = find_resolvo_id(&pool, &entry.candidates, target);
            match *disposition {
                Disposition::Locked(_) => entry.locked = resolved,
                Disposition::Favored(_) => entry.favored = resolved,
            }
        }

        Self {
            sack_pool,
            pool,
            candidates,
            name_ids: RefCell::new(name_ids),
            version_sets: RefCell::new(HashMap::new()),
            ignore_weak_deps,
        }
    }

    /// Interns `name`, reusing a prior id for the same name within this
    /// provider instance.
    pub(crate) fn name_id(&self, name: &str) -> NameId {
        let mut cache = self.name_ids.borrow_mut();
        if let Some(&id) = cache.get(name) {
            return id;
        }
        let id = self.pool.intern_package_name(name.to_string());
        cache.insert(name.to_string(), id);
        id
    }

    /// Interns a reldep as a version set, memoizing by structural equality.
    pub(crate) fn version_set(&self, reldep: &Reldep) -> VersionSetId {
        if let Some(&id) = self.version_sets.borrow().get(reldep) {
            return id;
        }
        let name_id = self.name_id(reldep.name().as_str());
        let id = self.pool.intern_version_set(name_id, ReldepVersionSet::new(reldep.clone()));
        self.version_sets.borrow_mut().insert(reldep.clone(), id);
        id
    }

}

fn find_resolvo_id<'a>(
    pool: &resolvo::Pool<ReldepVersionSet<'a>, String>,
    haystack: &[resolvo::SolvableId],
    want: SolvableId,
) -> Option<resolvo::SolvableId> {
    haystack
        .iter()
        .copied()
        .find(|&rid| pool.resolve_solvable(rid).inner().id == want)
}

impl<'a> DependencyProvider<ReldepVersionSet<'a>> for GoalProvider<'a> {
    fn pool(&self) -> &resolvo::Pool<ReldepVersionSet<'a>, String> {
        &self.pool
    }

    fn sort_candidates(
        &self,
        solver: &SolverCache<ReldepVersionSet<'a>, String, Self>,
        solvables: &mut [resolvo::SolvableId],
    ) {
        solvables.sort_by(|&a, &b| {
            let ra = solver.pool().resolve_solvable(a).inner();
            let rb = solver.pool().resolve_solvable(b).inner();
            rb.record.evr.cmp(&ra.record.evr).then_with(|| ra.id.cmp(&rb.id))
        });
    }

    fn get_candidates(&self, name: NameId) -> Option<Candidates> {
        self.candidates.get(&name).cloned()
    }

    fn get_dependencies(&self, solvable: resolvo::SolvableId) -> Dependencies {
        let record = self.pool.resolve_solvable(solvable).inner().record;
        let mut dependencies = Dependencies::default();
        for &reldep_id in &record.reldeps.requires {
            let reldep = self.sack_pool.resolve_reldep(reldep_id);
            dependencies.requirements.push(self.version_set(reldep));
        }
        if !self.ignore_weak_deps {
            for &reldep_id in &record.reldeps.recommends {
                let reldep = self.sack_pool.resolve_reldep(reldep_id);
                dependencies.requirements.push(self.version_set(reldep));
            }
        }
        dependencies
    }
}
