//! The goal state machine (spec.md §4.7).
//!
//! Grounded on `rattler_solve::resolvo::Solver::solve` for the
//! provider-build → root-requirements → `resolvo::Solver::solve` →
//! problem-rendering shape, and on `rattler::install::transaction` for
//! turning a decided set into a [`crate::Transaction`].

use std::collections::HashMap;

use pkgsack_pool::{PackageSet, SolvableId};
use pkgsack_query::Selector;
use resolvo::{SolvableDisplay, Solver as ResolvoSolver};

use crate::context::GoalContext;
use crate::error::GoalError;
use crate::job::{Job, JobKind};
use crate::provider::{Disposition, GoalProvider, ReldepVersionSet};
use crate::transaction::Transaction;

/// A display adapter for resolvo's problem renderer: candidates are shown
/// by their NEVRA, matching the package-id surface the rest of the crate
/// uses (spec.md §4.9).
struct NevraDisplay;

impl SolvableDisplay<ReldepVersionSet<'_>> for NevraDisplay {
    fn display_candidates(
        &self,
        pool: &resolvo::Pool<ReldepVersionSet<'_>, String>,
        candidates: &[resolvo::SolvableId],
    ) -> String {
        let mut names: Vec<String> = candidates
            .iter()
            .map(|&id| pool.resolve_solvable(id).inner().to_string())
            .collect();
        names.sort();
        names.join(" | ")
    }
}

/// The lifecycle state of a [`Goal`].
#[derive(Debug)]
enum GoalState {
    /// Jobs may still be staged; no solve has run yet.
    Ready,
    /// The last `run()` succeeded.
    Solved(Transaction),
    /// The last `run()` failed; carries the rendered problem list.
    Failed(Vec<String>),
}

/// Solver configuration flags (spec.md §4.7 step 2-3).
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalFlags {
    /// Apply `FORCEBEST` to every staged atom.
    pub force_best: bool,
    /// Allow the solver to uninstall non-protected packages to satisfy a
    /// requested change, even if nothing else asked for their removal.
    pub allow_uninstall: bool,
    /// Ignore `recommends`/`supplements` edges entirely.
    pub ignore_weak_deps: bool,
}

/// A staged set of install/erase/upgrade actions against one sack,
/// resolved into a transaction by `run()` (spec.md §4.7).
pub struct Goal<'a, C: GoalContext> {
    ctx: &'a C,
    jobs: Vec<Job>,
    upgrade_all: bool,
    distupgrade_all: bool,
    flags: GoalFlags,
    state: GoalState,
}

impl<'a, C: GoalContext> Goal<'a, C> {
    /// A goal with no staged jobs yet.
    pub fn new(ctx: &'a C) -> Self {
        Self {
            ctx,
            jobs: Vec::new(),
            upgrade_all: false,
            distupgrade_all: false,
            flags: GoalFlags::default(),
            state: GoalState::Ready,
        }
    }

    /// Sets the solver configuration flags.
    pub fn set_flags(&mut self, flags: GoalFlags) -> &mut Self {
        self.flags = flags;
        self
    }

    /// Stages an install job.
    pub fn install(&mut self, selector: Selector) -> &mut Self {
        self.jobs.push(Job::new(JobKind::Install, selector));
        self
    }

    /// Stages an erase job.
    pub fn erase(&mut self, selector: Selector, cleandeps: bool) -> &mut Self {
        self.jobs.push(Job::new(JobKind::Erase { cleandeps }, selector));
        self
    }

    /// Stages an upgrade job.
    pub fn upgrade(&mut self, selector: Selector) -> &mut Self {
        self.jobs.push(Job::new(JobKind::Upgrade, selector));
        self
    }

    /// Stages a distupgrade job.
    pub fn distupgrade(&mut self, selector: Selector) -> &mut Self {
        self.jobs.push(Job::new(JobKind::Distupgrade, selector));
        self
    }

    /// Stages a downgrade job.
    pub fn downgrade(&mut self, selector: Selector) -> &mut Self {
        self.jobs.push(Job::new(JobKind::Downgrade, selector));
        self
    }

    /// Stages a reinstall job.
    pub fn reinstall(&mut self, selector: Selector) -> &mut Self {
        self.jobs.push(Job::new(JobKind::Reinstall, selector));
        self
    }

    /// Requests a whole-sack upgrade (spec.md §4.7 step 2 `DISTUPGRADE|ALL`
    /// analog for plain upgrades).
    pub fn upgrade_all(&mut self) -> &mut Self {
        self.upgrade_all = true;
        self
    }

    /// Requests a whole-sack distupgrade.
    pub fn distupgrade_all(&mut self) -> &mut Self {
        self.distupgrade_all = true;
        self
    }

    /// Runs the goal: recomputes the candidate universe, builds and solves
    /// the dependency problem, trims installonly overflow, builds the
    /// transaction and checks it against the protected bitmap (spec.md
    /// §4.7 steps 1-7).
    pub fn run(&mut self) -> Result<&Transaction, GoalError> {
        match self.solve_inner() {
            Ok(transaction) => {
                self.state = GoalState::Solved(transaction);
            }
            Err(GoalError::NoSolution(problems)) => {
                self.state = GoalState::Failed(problems.clone());
                return Err(GoalError::NoSolution(problems));
            }
            Err(GoalError::RemovalOfProtectedPkg(names)) => {
                self.state = GoalState::Failed(vec![format!(
                    "The operation would result in removing the following protected packages: {}",
                    names.join(", ")
                )]);
                return Err(GoalError::RemovalOfProtectedPkg(names));
            }
            Err(other) => return Err(other),
        }
        match &self.state {
            GoalState::Solved(transaction) => Ok(transaction),
            _ => unreachable!("solve_inner only returns Ok for the Solved path"),
        }
    }

    /// The transaction from the last successful run. `INTERNAL_ERROR` if
    /// the goal has not been run, or last failed.
    pub fn transaction(&self) -> Result<&Transaction, GoalError> {
        match &self.state {
            GoalState::Solved(t) => Ok(t),
            GoalState::Ready => Err(GoalError::InternalError("goal has not been run".to_string())),
            GoalState::Failed(_) => Err(GoalError::InternalError("goal failed; see problems()".to_string())),
        }
    }

    /// The rendered problem list from the last failed run.
    pub fn problems(&self) -> &[String] {
        match &self.state {
            GoalState::Failed(problems) => problems,
            _ => &[],
        }
    }

    fn solve_inner(&self) -> Result<Transaction, GoalError> {
        // Step 1: recompute considered; make provides ready.
        let considered = self.ctx.considered();
        let installed = self
            .ctx
            .installed_repo()
            .map(|repo| self.ctx.pool().repo_solvables(repo))
            .unwrap_or_default();

        // Resolve every job's selector now, against the fresh considered
        // set, not at job-add time.
        let mut resolved: Vec<(JobKind, PackageSet)> = Vec::with_capacity(self.jobs.len());
        for job in &self.jobs {
            let set = job.selector.resolve(self.ctx)?;
            resolved.push((job.kind, set));
        }

        // Every solvable named directly by some job's resolved selector;
        // used to tell "this exact installed solvable is spoken for" from
        // "an unrelated solvable that merely shares its name" (e.g. erasing
        // kernel-5.1 must not disturb an unrelated, not-targeted kernel-5.0).
        let targeted_ids: PackageSet = resolved.iter().flat_map(|(_, set)| set.iter()).collect();

        // Erased solvables are dropped from the candidate universe outright
        // (spec.md §4.7 step 2 erase atom): resolvo has no "forbid" root
        // requirement, so the only way to force a solvable out is to never
        // offer it as a candidate.
        let erase_ids: PackageSet = resolved
            .iter()
            .filter(|(kind, _)| matches!(kind, JobKind::Erase { .. }))
            .flat_map(|(_, set)| set.iter())
            .collect();
        let any_cleandeps = resolved
            .iter()
            .any(|(kind, _)| matches!(kind, JobKind::Erase { cleandeps: true }));

        // cleandeps walks outward from the erased set, also excluding any
        // other installed package whose `requires` can no longer be
        // satisfied once the erased packages are gone (spec.md §4.7 step 7
        // / S4's "A-1 requires kernel = 5.1" orphan).
        let excluded = if any_cleandeps {
            cleandeps_orphans(self.ctx.pool(), &installed, &considered, &erase_ids, &targeted_ids)
        } else {
            erase_ids.clone()
        };

        // Step 2: disposition every remaining installed, non-job-targeted
        // name so the solve can tell "must stay" from "free to drop".
        // Protected names (or all names, absent ALLOWUNINSTALL) are locked:
        // pinned via a root requirement below. Everything else is merely
        // favored, so it only survives if something still needs it.
        let mut dispositions: HashMap<String, Disposition> = HashMap::new();
        if !self.upgrade_all && !self.distupgrade_all {
            for id in installed.iter() {
                if excluded.contains(id) {
                    continue;
                }
                if targeted_ids.contains(id) {
                    continue;
                }
                let Some(record) = self.ctx.pool().solvable(id) else { continue };
                // installonly names coexist in more than one version at
                // once; they're reconciled by the post-solve trim step
                // below instead of a single per-name SAT decision.
                if self.ctx.installonly_names().iter().any(|n| n == &record.name) {
                    continue;
                }
                let locked = self.ctx.protected().contains(id) || !self.flags.allow_uninstall;
                dispositions.insert(
                    record.name.clone(),
                    if locked { Disposition::Locked(id) } else { Disposition::Favored(id) },
                );
            }
        }

        let provider = GoalProvider::build(
            self.ctx.pool(),
            considered.iter().filter(|id| !excluded.contains(*id)),
            &dispositions,
            self.flags.ignore_weak_deps,
        );

        // Root requirements: one per job target name, one per locked
        // untouched name (pinning it to what's already installed), plus
        // whole-sack upgrade/distupgrade handled by requiring every
        // installed name's newest available candidate.
        let mut root_requirements = Vec::new();
        let mut user_targeted = PackageSet::new();
        let mut reinstall_targeted = PackageSet::new();
        for (kind, set) in &resolved {
            for id in set.iter() {
                user_targeted.insert(id);
            }
            if matches!(kind, JobKind::Reinstall) {
                for id in set.iter() {
                    reinstall_targeted.insert(id);
                }
            }
            if matches!(kind, JobKind::Erase { .. }) {
                continue;
            }
            for (name, ids) in group_by_name(self.ctx.pool(), set) {
                root_requirements.push(name_requirement(&provider, self.ctx.pool(), &name, &ids));
            }
        }
        // installonly names never reach `dispositions` in the first place
        // (see above), so every Locked entry here is safe to pin directly.
        for (name, disposition) in &dispositions {
            let Disposition::Locked(id) = *disposition else { continue };
            root_requirements.push(name_requirement(&provider, self.ctx.pool(), name, &[id]));
        }
        if self.upgrade_all || self.distupgrade_all {
            for id in installed.iter() {
                if let Some(record) = self.ctx.pool().solvable(id) {
                    root_requirements.push(provider.version_set(&pkgsack_types::reldep::Reldep::unversioned(
                        pkgsack_types::Name::new_unchecked(&record.name),
                    )));
                }
            }
        }

        let mut solver = ResolvoSolver::new(provider);
        let solved_ids = solver.solve(root_requirements).map_err(|problem| {
            GoalError::NoSolution(vec![problem.display_user_friendly(&solver, &NevraDisplay).to_string()])
        })?;

        let mut decided = PackageSet::new();
        for id in solved_ids {
            decided.insert(solver.pool().resolve_solvable(id).inner().id);
        }

        // Step 5: installonly trim-and-resolve.
        let limit = self.ctx.installonly_limit();
        if limit > 0 {
            for name in self.ctx.installonly_names() {
                let erase_requested: PackageSet = resolved
                    .iter()
                    .filter(|(kind, _)| matches!(kind, JobKind::Erase { .. }))
                    .flat_map(|(_, set)| set.iter())
                    .filter(|&id| self.ctx.pool().solvable(id).is_some_and(|r| &r.name == name))
                    .collect();

                let mut kept: Vec<SolvableId> = installed
                    .iter()
                    .chain(decided.iter())
                    .filter(|&id| self.ctx.pool().solvable(id).is_some_and(|r| &r.name == name))
                    .filter(|&id| !erase_requested.contains(id))
                    .collect();
                kept.sort();
                kept.dedup();

                if (kept.len() as u32) <= limit {
                    for id in &kept {
                        decided.insert(*id);
                    }
                    continue;
                }

                let running_kernel = self.ctx.running_kernel();
                kept.sort_by(|&a, &b| installonly_trim_order(self.ctx.pool(), running_kernel, a, b));
                let (keep, trim) = kept.split_at(limit as usize);
                for &id in keep {
                    decided.insert(id);
                }
                for &id in trim {
                    decided.remove(id);
                }
            }
        }

        let transaction = Transaction::build(
            self.ctx.pool(),
            &installed,
            &decided,
            self.ctx.installonly_names(),
            &user_targeted,
            &reinstall_targeted,
        );

        // Step 7: protected-packages check.
        let offending: Vec<String> = transaction
            .removed()
            .filter(|id| self.ctx.protected().contains(*id))
            .filter_map(|id| self.ctx.pool().solvable(id).map(|r| r.name.clone()))
            .collect();
        if !offending.is_empty() {
            return Err(GoalError::RemovalOfProtectedPkg(offending));
        }

        Ok(transaction)
    }
}

/// Transitive closure of "would become unsatisfiable if the erased set
/// disappeared": any other installed, non-job-targeted solvable whose
/// `requires` list has no surviving match is added to the excluded set, and
/// the check repeats until nothing new is found (spec.md §4.7 step 7,
/// Job::Erase's `cleandeps` doc).
fn cleandeps_orphans(
    pool: &pkgsack_pool::Pool,
    installed: &PackageSet,
    considered: &PackageSet,
    erase_ids: &PackageSet,
    targeted_ids: &PackageSet,
) -> PackageSet {
    let mut excluded = erase_ids.clone();
    loop {
        let mut changed = false;
        for id in installed.iter() {
            if excluded.contains(id) || targeted_ids.contains(id) {
                continue;
            }
            let Some(record) = pool.solvable(id) else { continue };
            let orphaned = record.reldeps.requires.iter().any(|&reldep_id| {
                let reldep = pool.resolve_reldep(reldep_id);
                !considered.iter().any(|cand| {
                    !excluded.contains(cand)
                        && pool.solvable(cand).is_some_and(|r| reldep.is_satisfied_by(&r.name, Some(&r.evr)))
                })
            });
            if orphaned {
                excluded.insert(id);
                changed = true;
            }
        }
        if !changed {
            return excluded;
        }
    }
}

fn group_by_name(pool: &pkgsack_pool::Pool, set: &PackageSet) -> HashMap<String, Vec<SolvableId>> {
    let mut by_name: HashMap<String, Vec<SolvableId>> = HashMap::new();
    for id in set.iter() {
        if let Some(record) = pool.solvable(id) {
            by_name.entry(record.name.clone()).or_default().push(id);
        }
    }
    by_name
}

/// Builds the root requirement for one job-target name: pinned to the
/// exact EVR when the selector matched a single solvable, otherwise a bare
/// name requirement that lets the solver pick the best candidate.
fn name_requirement(
    provider: &GoalProvider<'_>,
    pool: &pkgsack_pool::Pool,
    name: &str,
    ids: &[SolvableId],
) -> resolvo::VersionSetId {
    let reldep = match ids {
        [single] => pool
            .solvable(*single)
            .map(|r| {
                pkgsack_types::reldep::Reldep::versioned(
                    pkgsack_types::Name::new_unchecked(name),
                    pkgsack_types::reldep::ReldepFlags::EQ,
                    r.evr.clone(),
                )
            })
            .unwrap_or_else(|| pkgsack_types::reldep::Reldep::unversioned(pkgsack_types::Name::new_unchecked(name))),
        _ => pkgsack_types::reldep::Reldep::unversioned(pkgsack_types::Name::new_unchecked(name)),
    };
    provider.version_set(&reldep)
}

/// Sort order for installonly trimming: by name, running-kernel-last, EVR
/// descending, id ascending (spec.md §4.7 step 5, §8 S5). The slice is
/// split after `limit` entries, so this puts the packages to *keep* first.
fn installonly_trim_order(
    pool: &pkgsack_pool::Pool,
    running_kernel: Option<SolvableId>,
    a: SolvableId,
    b: SolvableId,
) -> std::cmp::Ordering {
    let a_is_running = running_kernel == Some(a);
    let b_is_running = running_kernel == Some(b);
    b_is_running.cmp(&a_is_running).then_with(|| {
        let ra = pool.solvable(a);
        let rb = pool.solvable(b);
        match (ra, rb) {
            (Some(ra), Some(rb)) => rb.evr.cmp(&ra.evr).then_with(|| a.cmp(&b)),
            _ => a.cmp(&b),
        }
    })
}

