//! End-to-end query scenarios against a small in-memory sack, independent
//! of any particular repo file format.

use pkgsack_pool::{PackageRecord, PackageSet, Pool, RepoId};
use pkgsack_query::{CmpType, Keyname, Query, SackView};
use pkgsack_types::advisory::Advisory;
use pkgsack_types::evr::Evr;

struct TestSack {
    pool: Pool,
}

impl SackView for TestSack {
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

fn record(name: &str, evr: &str, arch: &str, repo: RepoId) -> PackageRecord {
    PackageRecord {
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
        reldeps: pkgsack_pool::ReldepLists::default(),
    }
}

/// S3 — latest filter, name-only vs name+arch grouping.
#[test]
fn s3_latest_filter() {
    let mut pool = Pool::new();
    let repo = pool.new_repo("fedora", false).unwrap();
    let foo_1 = pool.add_solvable(record("foo", "1-1", "x86_64", repo));
    let foo_2_x86 = pool.add_solvable(record("foo", "2-1", "x86_64", repo));
    let foo_2_i686 = pool.add_solvable(record("foo", "2-1", "i686", repo));
    let bar_1 = pool.add_solvable(record("bar", "1-1", "x86_64", repo));
    let sack = TestSack { pool };

    let mut query = Query::new(&sack);
    query.set_latest(true);
    let result = query.apply().unwrap();
    assert!(!result.contains(foo_1));
    assert!(result.contains(foo_2_x86) ^ result.contains(foo_2_i686));
    assert!(result.contains(bar_1));
    assert_eq!(result.len(), 2);

    let mut query = Query::new(&sack);
    query.set_latest_per_arch(true);
    let result = query.apply().unwrap();
    assert!(result.contains(foo_2_x86));
    assert!(result.contains(foo_2_i686));
    assert!(result.contains(bar_1));
    assert_eq!(result.len(), 3);
}

/// S6 — upgrade set: only a name's single latest available build that beats
/// an installed build counts; an available package with no installed
/// counterpart by name does not.
#[test]
fn s6_upgrade_set() {
    let mut pool = Pool::new();
    let system = pool.new_repo("@System", true).unwrap();
    let fedora = pool.new_repo("fedora", false).unwrap();
    pool.add_solvable(record("A", "1-1", "x86_64", system));
    pool.add_solvable(record("B", "1-1", "x86_64", system));
    let a2 = pool.add_solvable(record("A", "2-1", "x86_64", fedora));
    pool.add_solvable(record("B", "1-1", "x86_64", fedora));
    pool.add_solvable(record("C", "1-1", "x86_64", fedora));
    let sack = TestSack { pool };

    let mut query = Query::new(&sack);
    query
        .filter_str(Keyname::Reponame, CmpType::EQ | CmpType::NOT, "@System".to_string())
        .unwrap();
    query.set_latest(true);
    query.apply().unwrap();
    query.set_upgrades(true);
    let result = query.apply().unwrap();
    assert_eq!(result.len(), 1);
    assert!(result.contains(a2));
}
