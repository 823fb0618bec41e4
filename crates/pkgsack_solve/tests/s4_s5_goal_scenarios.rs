//! End-to-end goal scenarios against a small in-memory sack.

use pkgsack_pool::{PackageSet, Pool, ReldepLists, RepoId, SolvableId};
use pkgsack_query::{CmpType, SackView, Selector};
use pkgsack_solve::{Goal, GoalContext, GoalError};
use pkgsack_types::advisory::Advisory;
use pkgsack_types::evr::Evr;
use pkgsack_types::name::Name;
use pkgsack_types::reldep::{Reldep, ReldepFlags};

struct TestCtx {
    pool: Pool,
    installed_repo: RepoId,
    protected: PackageSet,
    installonly_names: Vec<String>,
    installonly_limit: u32,
    running_kernel: Option<SolvableId>,
}

impl SackView for TestCtx {
    fn pool(&self) -> &Pool {
        &self.pool
    }
    fn considered(&self) -> PackageSet {
        self.pool.universe()
    }
    fn advisories(&self) -> &[Advisory] {
        &[]
    }
}

impl GoalContext for TestCtx {
    fn installed_repo(&self) -> Option<RepoId> {
        Some(self.installed_repo)
    }
    fn protected(&self) -> &PackageSet {
        &self.protected
    }
    fn installonly_names(&self) -> &[String] {
        &self.installonly_names
    }
    fn installonly_limit(&self) -> u32 {
        self.installonly_limit
    }
    fn running_kernel(&self) -> Option<SolvableId> {
        self.running_kernel
    }
}

fn record(
    name: &str,
    evr: &str,
    arch: &str,
    repo: RepoId,
    requires: Vec<pkgsack_pool::ReldepId>,
) -> pkgsack_pool::PackageRecord {
    pkgsack_pool::PackageRecord {
        name: name.to_string(),
        evr: Evr::parse(evr).unwrap(),
        arch: arch.to_string(),
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
        reldeps: ReldepLists { requires, ..Default::default() },
    }
}

fn name_evr_selector(name: &str, evr: &str) -> Selector {
    Selector::new().set_name(CmpType::EQ, name).unwrap().set_evr(evr)
}

/// S4 — erasing a protected package fails the goal, even though the solver
/// itself finds a transaction that removes it.
#[test]
fn s4_protected_removal() {
    let mut pool = Pool::new();
    let repo = pool.new_repo("@System", true).unwrap();
    let kernel_51_req =
        pool.intern_reldep(Reldep::versioned(Name::new("kernel").unwrap(), ReldepFlags::EQ, Evr::parse("5.1-1").unwrap()));
    let _kernel_50 = pool.add_solvable(record("kernel", "5.0-1", "x86_64", repo, vec![]));
    let kernel_51 = pool.add_solvable(record("kernel", "5.1-1", "x86_64", repo, vec![]));
    let _a = pool.add_solvable(record("A", "1-1", "x86_64", repo, vec![kernel_51_req]));

    let mut protected = PackageSet::new();
    protected.insert(kernel_51);

    let ctx = TestCtx {
        pool,
        installed_repo: repo,
        protected,
        installonly_names: Vec::new(),
        installonly_limit: 0,
        running_kernel: None,
    };

    let mut goal = Goal::new(&ctx);
    goal.erase(name_evr_selector("kernel", "5.1-1"), true);
    let err = goal.run().unwrap_err();
    match err {
        GoalError::RemovalOfProtectedPkg(names) => assert_eq!(names, vec!["kernel".to_string()]),
        other => panic!("expected RemovalOfProtectedPkg, got {other:?}"),
    }
    assert!(!goal.problems().is_empty());
}

/// S5 — installing a third kernel version over the installonly limit of 2
/// erases the oldest, keeping the new install and the previous newest.
#[test]
fn s5_installonly_trim() {
    let mut pool = Pool::new();
    let system = pool.new_repo("@System", true).unwrap();
    let fedora = pool.new_repo("fedora", false).unwrap();
    let kernel_1 = pool.add_solvable(record("kernel", "1-1", "x86_64", system, vec![]));
    let kernel_2 = pool.add_solvable(record("kernel", "2-1", "x86_64", system, vec![]));
    let kernel_3 = pool.add_solvable(record("kernel", "3-1", "x86_64", fedora, vec![]));

    let ctx = TestCtx {
        pool,
        installed_repo: system,
        protected: PackageSet::new(),
        installonly_names: vec!["kernel".to_string()],
        installonly_limit: 2,
        running_kernel: None,
    };

    let mut goal = Goal::new(&ctx);
    goal.install(name_evr_selector("kernel", "3-1"));
    let transaction = goal.run().unwrap();

    let installed: Vec<SolvableId> = transaction.installed().collect();
    let removed: Vec<SolvableId> = transaction.removed().collect();
    assert_eq!(installed, vec![kernel_3]);
    assert_eq!(removed, vec![kernel_1]);
    assert!(!removed.contains(&kernel_2));
}
