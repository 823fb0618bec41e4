//! The query engine itself (spec.md §4.4).

use std::collections::HashMap;
use std::collections::HashSet;

use pkgsack_pool::{PackageSet, PackageRecord, SolvableId};
use pkgsack_types::evr::Evr;
use pkgsack_types::reldep::Reldep;

use crate::cmp::CmpType;
use crate::context::SackView;
use crate::error::QueryError;
use crate::filter::{Filter, MatchValue};
use crate::keyname::{KeyClass, Keyname};

/// A composable, lazily-applied filter over a sack's packages (spec.md §3
/// Query).
pub struct Query<'a, C: SackView> {
    ctx: &'a C,
    filters: Vec<Filter>,
    ignore_excludes: bool,
    base: Option<PackageSet>,
    latest: bool,
    latest_per_arch: bool,
    upgrades: bool,
    upgradable: bool,
    downgrades: bool,
    downgradable: bool,
}

impl<'a, C: SackView> Query<'a, C> {
    /// Creates a new query reading from `ctx`.
    pub fn new(ctx: &'a C) -> Self {
        Self {
            ctx,
            filters: Vec::new(),
            ignore_excludes: false,
            base: None,
            latest: false,
            latest_per_arch: false,
            upgrades: false,
            upgradable: false,
            downgrades: false,
            downgradable: false,
        }
    }

    /// Makes this query (and any subsequent apply) read from the full
    /// universe rather than `considered` (spec.md §4.2 `IGNORE_EXCLUDES`).
    pub fn ignore_excludes(mut self, ignore: bool) -> Self {
        self.ignore_excludes = ignore;
        self
    }

    /// Keep only each name's highest-EVR solvable (or, with
    /// `latest_per_arch`, each `(name, arch)`'s).
    pub fn set_latest(&mut self, latest: bool) -> &mut Self {
        self.latest = latest;
        self
    }

    /// See [`Query::set_latest`].
    pub fn set_latest_per_arch(&mut self, latest_per_arch: bool) -> &mut Self {
        self.latest_per_arch = latest_per_arch;
        self
    }

    /// Restrict to available packages that would upgrade some installed
    /// package of the same name.
    pub fn set_upgrades(&mut self, upgrades: bool) -> &mut Self {
        self.upgrades = upgrades;
        self
    }

    /// Restrict to installed packages for which a newer available package
    /// exists.
    pub fn set_upgradable(&mut self, upgradable: bool) -> &mut Self {
        self.upgradable = upgradable;
        self
    }

    /// Restrict to available packages that would downgrade some installed
    /// package of the same name.
    pub fn set_downgrades(&mut self, downgrades: bool) -> &mut Self {
        self.downgrades = downgrades;
        self
    }

    /// Restrict to installed packages for which an older available package
    /// exists.
    pub fn set_downgradable(&mut self, downgradable: bool) -> &mut Self {
        self.downgradable = downgradable;
        self
    }

    /// Forces the result to the empty set.
    pub fn filter_empty(&mut self) -> &mut Self {
        self.filters
            .push(Filter::new(Keyname::Pkg, CmpType::EQ, vec![MatchValue::Pkg(PackageSet::new())]));
        self
    }

    /// Adds a string filter. `BAD_QUERY` if `key` is not string-compatible
    /// or `cmp` is not allowed for it (spec.md §4.4 allowed-keys table).
    pub fn filter_str(
        &mut self,
        key: Keyname,
        cmp: CmpType,
        value: impl Into<String>,
    ) -> Result<&mut Self, QueryError> {
        self.filter_str_in(key, cmp, vec![value.into()])
    }

    /// Like [`Query::filter_str`], OR-ing over several values.
    pub fn filter_str_in(&mut self, key: Keyname, cmp: CmpType, values: Vec<String>) -> Result<&mut Self, QueryError> {
        key.validate_cmp(cmp)?;
        if matches!(key.class(), KeyClass::Reldep) {
            // Equality-mode reldep-typed string filters parse each value as
            // a reldep; a parse failure yields an empty filter rather than
            // an error (spec.md §7), except under GLOB where the raw
            // string is matched against reldep names directly.
            if cmp.base() == Some(CmpType::GLOB) {
                self.filters
                    .push(Filter::new(key, cmp, values.into_iter().map(MatchValue::Str).collect()));
            } else {
                let parsed: Vec<MatchValue> = values
                    .iter()
                    .filter_map(|v| Reldep::parse(v).map(MatchValue::Reldep))
                    .collect();
                self.filters.push(Filter::new(key, cmp, parsed));
            }
            return Ok(self);
        }
        self.filters
            .push(Filter::new(key, cmp, values.into_iter().map(MatchValue::Str).collect()));
        Ok(self)
    }

    /// Adds a numeric filter (currently only `epoch`, spec.md §4.4).
    pub fn filter_num(&mut self, key: Keyname, cmp: CmpType, n: i64) -> Result<&mut Self, QueryError> {
        self.filter_num_in(key, cmp, vec![n])
    }

    /// Like [`Query::filter_num`], OR-ing over several values.
    pub fn filter_num_in(&mut self, key: Keyname, cmp: CmpType, values: Vec<i64>) -> Result<&mut Self, QueryError> {
        if key != Keyname::Epoch {
            return Err(QueryError::BadQuery(format!("{key:?} is not a numeric key")));
        }
        key.validate_cmp(cmp)?;
        self.filters
            .push(Filter::new(key, cmp, values.into_iter().map(MatchValue::Num).collect()));
        Ok(self)
    }

    /// Adds a package-set filter. `cmp` must be `EQ` or `EQ|NOT`; `key`
    /// must be `pkg` or `obsoletes(pkg)`-class.
    pub fn filter_pkg(&mut self, key: Keyname, cmp: CmpType, pkgset: PackageSet) -> Result<&mut Self, QueryError> {
        if !matches!(key, Keyname::Pkg | Keyname::ObsoletesPkg) {
            return Err(QueryError::BadQuery(format!("{key:?} is not a package-set key")));
        }
        if cmp.base() != Some(CmpType::EQ) {
            return Err(QueryError::BadQuery(
                "filter_pkg cmp must be EQ (use NOT for NEQ)".to_string(),
            ));
        }
        self.filters.push(Filter::new(key, cmp, vec![MatchValue::Pkg(pkgset)]));
        Ok(self)
    }

    /// Adds a reldep filter; `cmp` is implicitly `EQ` (spec.md §4.4).
    pub fn filter_reldep(&mut self, key: Keyname, reldep: Reldep) -> Result<&mut Self, QueryError> {
        self.filter_reldep_in(key, vec![reldep])
    }

    /// Like [`Query::filter_reldep`], OR-ing over several reldeps.
    pub fn filter_reldep_in(&mut self, key: Keyname, reldeps: Vec<Reldep>) -> Result<&mut Self, QueryError> {
        if !matches!(key.class(), KeyClass::Reldep) {
            return Err(QueryError::BadQuery(format!("{key:?} is not a reldep key")));
        }
        self.filters.push(Filter::new(
            key,
            CmpType::EQ,
            reldeps.into_iter().map(MatchValue::Reldep).collect(),
        ));
        Ok(self)
    }

    /// Sugar: builds a single reldep from `(name, evr)` under `cmp` and
    /// filters `provides` on it.
    pub fn filter_provides(&mut self, cmp: CmpType, name: &str, evr: &Evr) -> Result<&mut Self, QueryError> {
        let name = pkgsack_types::name::Name::new(name).map_err(|e| QueryError::BadQuery(e.to_string()))?;
        let flags = match cmp.base() {
            Some(CmpType::EQ) => pkgsack_types::reldep::ReldepFlags::EQ,
            Some(CmpType::LT) => pkgsack_types::reldep::ReldepFlags::LT,
            Some(CmpType::GT) => pkgsack_types::reldep::ReldepFlags::GT,
            _ => return Err(QueryError::BadQuery("filter_provides cmp must be EQ/LT/GT".to_string())),
        };
        let reldep = Reldep::versioned(name, flags, evr.clone());
        self.filter_reldep(Keyname::Provides, reldep)
    }

    /// Applies every accumulated filter left-to-right, runs the post
    /// filters, clears the filter list and returns the resulting bitmap.
    /// Subsequent filter calls refine this result further (spec.md §3
    /// Query lifecycle).
    pub fn apply(&mut self) -> Result<PackageSet, QueryError> {
        tracing::debug!(filters = self.filters.len(), latest = self.latest, "applying query");
        let domain = self.base.clone().unwrap_or_else(|| {
            if self.ignore_excludes {
                self.ctx.pool().universe()
            } else {
                self.ctx.considered()
            }
        });
        let mut result = domain.clone();
        for filter in &self.filters {
            let m = self.match_set(&domain, filter)?;
            if filter.cmp.is_negated() {
                result.subtract(&m);
            } else {
                result.intersect_with(&m);
            }
        }
        if self.downgradable {
            result = self.restrict_installed_has_counterpart(&result, false);
        }
        if self.upgradable {
            result = self.restrict_installed_has_counterpart(&result, true);
        }
        if self.downgrades {
            result = self.restrict_is_counterpart_of_installed(&result, false);
        }
        if self.upgrades {
            result = self.restrict_is_counterpart_of_installed(&result, true);
        }
        if self.latest || self.latest_per_arch {
            result = self.restrict_latest(&result, self.latest_per_arch);
        }
        self.filters.clear();
        self.base = Some(result.clone());
        Ok(result)
    }

    /// Deep-copies this query's staged filters, flags and already-applied
    /// base (spec.md §3 "Queries may be cloned").
    pub fn try_clone(&self) -> Self {
        Self {
            ctx: self.ctx,
            filters: self.filters.clone(),
            ignore_excludes: self.ignore_excludes,
            base: self.base.clone(),
            latest: self.latest,
            latest_per_arch: self.latest_per_arch,
            upgrades: self.upgrades,
            upgradable: self.upgradable,
            downgrades: self.downgrades,
            downgradable: self.downgradable,
        }
    }

    fn match_set(&self, domain: &PackageSet, filter: &Filter) -> Result<PackageSet, QueryError> {
        use Keyname::*;
        match filter.key {
            Name | Arch | Evr | Summary | Description | Url | Reponame | Nevra => {
                Ok(self.match_free_string(domain, filter))
            }
            File => Ok(self.match_file(domain, filter)),
            Version | Release => Ok(self.match_evr_ordered(domain, filter)),
            Epoch => Ok(self.match_epoch(domain, filter)),
            Location | Sourcerpm => Ok(self.match_identity(domain, filter)),
            Provides => Ok(self.match_provides(filter)),
            Requires | Obsoletes | Conflicts | Enhances | Recommends | Suggests | Supplements => {
                Ok(self.match_reldep_list(domain, filter))
            }
            Pkg => Ok(self.match_pkg(filter)),
            ObsoletesPkg => Ok(self.match_obsoletes_pkg(domain, filter)),
            Advisory | AdvisoryBug | AdvisoryCve | AdvisoryType | AdvisorySeverity => {
                Ok(self.match_advisory(domain, filter))
            }
        }
    }

    /// String value of a free-string key for one record (spec.md §4.4
    /// "Dataiterator path").
    fn string_field(&self, key: Keyname, id: SolvableId, record: &PackageRecord) -> String {
        match key {
            Keyname::Name => record.name.clone(),
            Keyname::Arch => record.arch.clone(),
            Keyname::Evr => record.evr.to_string(),
            Keyname::Summary => record.summary.clone(),
            Keyname::Description => record.description.clone(),
            Keyname::Url => record.url.clone().unwrap_or_default(),
            Keyname::Reponame => self.ctx.pool().repo(record.repo).name().to_string(),
            Keyname::Nevra => {
                let _ = id;
                record.nevra().to_string()
            }
            _ => String::new(),
        }
    }

    fn match_free_string(&self, domain: &PackageSet, filter: &Filter) -> PackageSet {
        let pool = self.ctx.pool();
        let Some(base) = filter.cmp.base() else { return PackageSet::new() };
        let icase = filter.cmp.is_icase();
        let mut out = PackageSet::new();
        'outer: for id in domain.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            let value = self.string_field(filter.key, id, record);
            for m in &filter.matches {
                if let MatchValue::Str(pattern) = m {
                    if string_matches(&value, pattern, base, icase) {
                        out.insert(id);
                        continue 'outer;
                    }
                }
            }
        }
        out
    }

    fn match_file(&self, domain: &PackageSet, filter: &Filter) -> PackageSet {
        let pool = self.ctx.pool();
        let Some(base) = filter.cmp.base() else { return PackageSet::new() };
        let icase = filter.cmp.is_icase();
        let mut out = PackageSet::new();
        'outer: for id in domain.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            for m in &filter.matches {
                if let MatchValue::Str(pattern) = m {
                    if record.files.iter().any(|f| string_matches(f, pattern, base, icase)) {
                        out.insert(id);
                        continue 'outer;
                    }
                }
            }
        }
        out
    }

    fn match_evr_ordered(&self, domain: &PackageSet, filter: &Filter) -> PackageSet {
        let pool = self.ctx.pool();
        let Some(base) = filter.cmp.base() else { return PackageSet::new() };
        let mut out = PackageSet::new();
        'outer: for id in domain.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            let segment = if filter.key == Keyname::Version {
                record.evr.version()
            } else {
                record.evr.release()
            };
            for m in &filter.matches {
                let MatchValue::Str(pattern) = m else { continue };
                let hit = if base == CmpType::GLOB {
                    fnmatch_regex::glob_to_regex(pattern)
                        .map(|re| re.is_match(segment))
                        .unwrap_or(false)
                } else {
                    let (synthetic, target) = if filter.key == Keyname::Version {
                        (Evr::version_only(segment), Evr::version_only(pattern.as_str()))
                    } else {
                        (Evr::release_only(segment), Evr::release_only(pattern.as_str()))
                    };
                    match (base, synthetic.cmp(&target)) {
                        (CmpType::EQ, std::cmp::Ordering::Equal) => true,
                        (CmpType::LT, std::cmp::Ordering::Less) => true,
                        (CmpType::GT, std::cmp::Ordering::Greater) => true,
                        _ => false,
                    }
                };
                if hit {
                    out.insert(id);
                    continue 'outer;
                }
            }
        }
        out
    }

    fn match_epoch(&self, domain: &PackageSet, filter: &Filter) -> PackageSet {
        let pool = self.ctx.pool();
        let Some(base) = filter.cmp.base() else { return PackageSet::new() };
        let mut out = PackageSet::new();
        'outer: for id in domain.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            let epoch = record.evr.epoch() as i64;
            for m in &filter.matches {
                let target = match m {
                    MatchValue::Num(n) => *n,
                    MatchValue::Str(s) => match s.parse::<i64>() {
                        Ok(n) => n,
                        Err(_) => continue,
                    },
                    _ => continue,
                };
                let hit = match base {
                    CmpType::EQ => epoch == target,
                    CmpType::LT => epoch < target,
                    CmpType::GT => epoch > target,
                    _ => false,
                };
                if hit {
                    out.insert(id);
                    continue 'outer;
                }
            }
        }
        out
    }

    fn match_identity(&self, domain: &PackageSet, filter: &Filter) -> PackageSet {
        let pool = self.ctx.pool();
        let mut out = PackageSet::new();
        'outer: for id in domain.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            let value = match filter.key {
                Keyname::Location => record.location.as_deref(),
                Keyname::Sourcerpm => record.sourcerpm.as_deref(),
                _ => None,
            };
            let Some(value) = value else { continue };
            for m in &filter.matches {
                if let MatchValue::Str(pattern) = m {
                    if value == pattern {
                        out.insert(id);
                        continue 'outer;
                    }
                }
            }
        }
        out
    }

    fn match_provides(&self, filter: &Filter) -> PackageSet {
        let pool = self.ctx.pool();
        let mut out = PackageSet::new();
        for m in &filter.matches {
            match m {
                MatchValue::Reldep(r) => {
                    if let Some(id) = pool.lookup_reldep(r) {
                        for &solvable in pool.providers_of(id) {
                            out.insert(solvable);
                        }
                    }
                }
                MatchValue::Str(pattern) => {
                    // GLOB mode: enumerate every interned reldep whose name
                    // matches, then union their providers.
                    if let Ok(re) = fnmatch_regex::glob_to_regex(pattern) {
                        for (id, reldep) in pool.reldeps() {
                            if re.is_match(reldep.name().as_str()) {
                                for &solvable in pool.providers_of(id) {
                                    out.insert(solvable);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn reldep_list<'r>(&self, key: Keyname, record: &'r PackageRecord) -> &'r [pkgsack_pool::ReldepId] {
        match key {
            Keyname::Requires => &record.reldeps.requires,
            Keyname::Obsoletes => &record.reldeps.obsoletes,
            Keyname::Conflicts => &record.reldeps.conflicts,
            Keyname::Enhances => &record.reldeps.enhances,
            Keyname::Recommends => &record.reldeps.recommends,
            Keyname::Suggests => &record.reldeps.suggests,
            Keyname::Supplements => &record.reldeps.supplements,
            _ => &[],
        }
    }

    fn match_reldep_list(&self, domain: &PackageSet, filter: &Filter) -> PackageSet {
        let pool = self.ctx.pool();
        let glob = filter.cmp.base() == Some(CmpType::GLOB);
        let mut out = PackageSet::new();
        'outer: for id in domain.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            for &candidate_id in self.reldep_list(filter.key, record) {
                let candidate = pool.resolve_reldep(candidate_id);
                for m in &filter.matches {
                    let hit = match m {
                        MatchValue::Reldep(target) if !glob => {
                            // spec.md §4.4: "test dep-match(r_match, r_candidate)";
                            // the candidate's own flags decide whether the
                            // match reldep's evr satisfies it (e.g. a
                            // candidate "foo >= 1.0" is dep-matched by a
                            // filter "foo = 1.0").
                            candidate.is_satisfied_by(target.name().as_str(), target.evr())
                        }
                        MatchValue::Str(pattern) if glob => fnmatch_regex::glob_to_regex(pattern)
                            .map(|re| re.is_match(candidate.name().as_str()))
                            .unwrap_or(false),
                        _ => false,
                    };
                    if hit {
                        out.insert(id);
                        continue 'outer;
                    }
                }
            }
        }
        out
    }

    fn match_pkg(&self, filter: &Filter) -> PackageSet {
        let mut out = PackageSet::new();
        for m in &filter.matches {
            if let MatchValue::Pkg(set) = m {
                out.union_with(set);
            }
        }
        out
    }

    fn match_obsoletes_pkg(&self, domain: &PackageSet, filter: &Filter) -> PackageSet {
        let pool = self.ctx.pool();
        let mut out = PackageSet::new();
        let targets: Vec<&PackageSet> = filter
            .matches
            .iter()
            .filter_map(|m| if let MatchValue::Pkg(s) = m { Some(s) } else { None })
            .collect();
        'outer: for id in domain.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            for &obsolete_id in &record.reldeps.obsoletes {
                let reldep = pool.resolve_reldep(obsolete_id);
                for &provider in pool.providers_of(obsolete_id) {
                    let provider_record = pool.solvable(provider).expect("provider must resolve");
                    if provider_record.name != reldep.name().as_str() {
                        continue;
                    }
                    if targets.iter().any(|t| t.contains(provider)) {
                        out.insert(id);
                        continue 'outer;
                    }
                }
            }
        }
        out
    }

    fn match_advisory(&self, domain: &PackageSet, filter: &Filter) -> PackageSet {
        use pkgsack_types::advisory::{Advisory, AdvisoryKind, AdvisorySeverity};

        let values: Vec<&str> = filter
            .matches
            .iter()
            .filter_map(|m| if let MatchValue::Str(s) = m { Some(s.as_str()) } else { None })
            .collect();

        let field_matches = |advisory: &Advisory| -> bool {
            values.iter().any(|v| match filter.key {
                Keyname::Advisory => advisory.id == *v,
                Keyname::AdvisoryBug => advisory.bugs.iter().any(|b| b == v),
                Keyname::AdvisoryCve => advisory.cves.iter().any(|c| c == v),
                Keyname::AdvisoryType => matches!(&advisory.kind, kind if advisory_kind_str(kind) == *v),
                Keyname::AdvisorySeverity => advisory_severity_str(&advisory.severity) == *v,
                _ => false,
            })
        };

        // (name, epoch, version, release, arch) tuples from every matching
        // advisory's package list; a hash set keeps the subsequent scan
        // O(|domain|) instead of O(|domain| * |advisory packages|) (spec.md
        // §4.8 step 3 "remove matched entries to keep scans sub-linear").
        let mut wanted: HashSet<(String, u32, String, String, String)> = HashSet::new();
        for advisory in self.ctx.advisories() {
            if !field_matches(advisory) {
                continue;
            }
            for pkg in &advisory.packages {
                wanted.insert((
                    pkg.name.clone(),
                    pkg.evr.epoch(),
                    pkg.evr.version().to_string(),
                    pkg.evr.release().to_string(),
                    pkg.arch.clone(),
                ));
            }
        }

        let pool = self.ctx.pool();
        let mut out = PackageSet::new();
        for id in domain.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            let key = (
                record.name.clone(),
                record.evr.epoch(),
                record.evr.version().to_string(),
                record.evr.release().to_string(),
                record.arch.clone(),
            );
            if wanted.contains(&key) {
                out.insert(id);
            }
        }
        out
    }

    fn restrict_installed_has_counterpart(&self, result: &PackageSet, newer: bool) -> PackageSet {
        let pool = self.ctx.pool();
        let Some(installed_repo) = pool.installed_repo() else {
            return PackageSet::new();
        };
        let universe = pool.universe();
        let mut keep = PackageSet::new();
        for id in result.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            if record.repo != installed_repo {
                continue;
            }
            let has_counterpart = universe.iter().any(|other| {
                if other == id {
                    return false;
                }
                let other_record = pool.solvable(other).expect("universe member must resolve");
                if other_record.repo == installed_repo {
                    return false;
                }
                other_record.name == record.name
                    && if newer {
                        other_record.evr > record.evr
                    } else {
                        other_record.evr < record.evr
                    }
            });
            if has_counterpart {
                keep.insert(id);
            }
        }
        keep
    }

    fn restrict_is_counterpart_of_installed(&self, result: &PackageSet, is_upgrade: bool) -> PackageSet {
        let pool = self.ctx.pool();
        let Some(installed_repo) = pool.installed_repo() else {
            return PackageSet::new();
        };
        let mut installed_by_name: HashMap<&str, Vec<&Evr>> = HashMap::new();
        for id in pool.universe().iter() {
            let record = pool.solvable(id).expect("universe member must resolve");
            if record.repo == installed_repo {
                installed_by_name.entry(record.name.as_str()).or_default().push(&record.evr);
            }
        }
        let mut keep = PackageSet::new();
        for id in result.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            if record.repo == installed_repo {
                continue;
            }
            let Some(evrs) = installed_by_name.get(record.name.as_str()) else { continue };
            let is_counterpart = evrs
                .iter()
                .any(|installed_evr| if is_upgrade { record.evr > **installed_evr } else { record.evr < **installed_evr });
            if is_counterpart {
                keep.insert(id);
            }
        }
        keep
    }

    fn restrict_latest(&self, result: &PackageSet, per_arch: bool) -> PackageSet {
        let pool = self.ctx.pool();
        // `result.iter()` yields ascending solvable-id order, so the first
        // candidate seen for a given key is kept on EVR ties (spec.md §4.4
        // step 3, §8 invariant 7).
        let mut best: HashMap<(String, Option<String>), (SolvableId, Evr)> = HashMap::new();
        for id in result.iter() {
            let record = pool.solvable(id).expect("domain member must resolve");
            let key = if per_arch {
                (record.name.clone(), Some(record.arch.clone()))
            } else {
                (record.name.clone(), None)
            };
            match best.get(&key) {
                None => {
                    best.insert(key, (id, record.evr.clone()));
                }
                Some((_, best_evr)) => {
                    if record.evr > *best_evr {
                        best.insert(key, (id, record.evr.clone()));
                    }
                }
            }
        }
        best.into_values().map(|(id, _)| id).collect()
    }
}

fn advisory_kind_str(kind: &pkgsack_types::advisory::AdvisoryKind) -> String {
    use pkgsack_types::advisory::AdvisoryKind::*;
    match kind {
        Security => "security".to_string(),
        Bugfix => "bugfix".to_string(),
        Enhancement => "enhancement".to_string(),
        NewPackage => "newpackage".to_string(),
        Other(s) => s.clone(),
    }
}

fn advisory_severity_str(severity: &pkgsack_types::advisory::AdvisorySeverity) -> &'static str {
    use pkgsack_types::advisory::AdvisorySeverity::*;
    match severity {
        Unspecified => "unspecified",
        Low => "low",
        Moderate => "moderate",
        Important => "important",
        Critical => "critical",
    }
}

fn string_matches(candidate: &str, pattern: &str, base: CmpType, icase: bool) -> bool {
    let (c, p) = if icase {
        (candidate.to_lowercase(), pattern.to_lowercase())
    } else {
        (candidate.to_string(), pattern.to_string())
    };
    if base == CmpType::EQ {
        c == p
    } else if base == CmpType::SUBSTR {
        c.contains(&p)
    } else if base == CmpType::GLOB {
        fnmatch_regex::glob_to_regex(&p).map(|re| re.is_match(&c)).unwrap_or(false)
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use pkgsack_pool::Pool;
    use pkgsack_types::advisory::Advisory;

    use super::*;
    use crate::context::SackView;

    struct TestSack {
        pool: Pool,
        advisories: Vec<Advisory>,
    }

    impl SackView for TestSack {
        fn pool(&self) -> &Pool {
            &self.pool
        }
        fn considered(&self) -> PackageSet {
            self.pool.universe()
        }
        fn advisories(&self) -> &[Advisory] {
            &self.advisories
        }
    }

    fn bare_record(name: &str, evr: &str, arch: &str, repo: pkgsack_pool::RepoId) -> PackageRecord {
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

    // S3 (latest filter) and S6 (upgrade set) now live in
    // `tests/s3_s6_query_scenarios.rs` as crate-level integration tests.

    /// Two installed builds of an installonly kernel must not look like
    /// upgrades/downgrades of each other; only an available counterpart
    /// outside the installed repo counts (libdnf's `filter_updown`/
    /// `filter_updown_able` skip `s->repo == pool->installed` on both sides).
    #[test]
    fn test_upgradable_ignores_other_installed_builds() {
        let mut pool = Pool::new();
        let system = pool.new_repo("@System", true).unwrap();
        pool.add_solvable(bare_record("kernel", "1-1", "x86_64", system));
        pool.add_solvable(bare_record("kernel", "2-1", "x86_64", system));
        let sack = TestSack { pool, advisories: Vec::new() };

        let mut query = Query::new(&sack);
        query.set_upgradable(true);
        let result = query.apply().unwrap();
        assert!(result.is_empty(), "no available build exists, so nothing is upgradable");

        let mut query = Query::new(&sack);
        query.set_downgradable(true);
        let result = query.apply().unwrap();
        assert!(result.is_empty(), "no available build exists, so nothing is downgradable");
    }

    /// Mirrors the above for `upgrades`/`downgrades`: an installed build
    /// must never be reported as its own upgrade/downgrade counterpart.
    #[test]
    fn test_upgrades_ignores_other_installed_builds() {
        let mut pool = Pool::new();
        let system = pool.new_repo("@System", true).unwrap();
        pool.add_solvable(bare_record("kernel", "1-1", "x86_64", system));
        pool.add_solvable(bare_record("kernel", "2-1", "x86_64", system));
        let sack = TestSack { pool, advisories: Vec::new() };

        let mut query = Query::new(&sack);
        query.set_upgrades(true);
        let result = query.apply().unwrap();
        assert!(result.is_empty());

        let mut query = Query::new(&sack);
        query.set_downgrades(true);
        let result = query.apply().unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_filter_str_name_eq() {
        let mut pool = Pool::new();
        let repo = pool.new_repo("fedora", false).unwrap();
        let foo = pool.add_solvable(bare_record("foo", "1-1", "x86_64", repo));
        pool.add_solvable(bare_record("bar", "1-1", "x86_64", repo));
        let sack = TestSack { pool, advisories: Vec::new() };

        let mut query = Query::new(&sack);
        query.filter_str(Keyname::Name, CmpType::EQ, "foo").unwrap();
        let result = query.apply().unwrap();
        assert_eq!(result.iter().collect::<Vec<_>>(), vec![foo]);
    }

    #[test]
    fn test_unparseable_reldep_equality_filter_is_empty() {
        let mut pool = Pool::new();
        let repo = pool.new_repo("fedora", false).unwrap();
        pool.add_solvable(bare_record("foo", "1-1", "x86_64", repo));
        let sack = TestSack { pool, advisories: Vec::new() };

        let mut query = Query::new(&sack);
        // Unbalanced quoting / trailing garbage: not a valid reldep string.
        query
            .filter_str(Keyname::Requires, CmpType::EQ, "foo >= 1.0 extra garbage")
            .unwrap();
        let result = query.apply().unwrap();
        assert!(result.is_empty());
    }
}
