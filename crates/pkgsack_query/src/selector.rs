//! A typed subset of [`crate::Query`] restricted to the fields meaningful
//! as a solver job (spec.md §3 Selector, §4.6 Job Compilation).

use pkgsack_pool::PackageSet;
use pkgsack_types::arch::validate_arch;

use crate::cmp::CmpType;
use crate::context::SackView;
use crate::error::QueryError;
use crate::keyname::Keyname;
use crate::query::Query;

#[derive(Debug, Clone)]
struct Atom {
    cmp: CmpType,
    value: String,
}

/// A restricted query: at most one filter per field from `{name, provides,
/// file, arch, evr, reponame}` (spec.md §3 Selector).
#[derive(Debug, Clone, Default)]
pub struct Selector {
    name: Option<Atom>,
    provides: Option<Atom>,
    file: Option<Atom>,
    arch: Option<String>,
    evr: Option<String>,
    reponame: Option<String>,
}

impl Selector {
    /// An empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `name` field; `cmp` must be `EQ` or `GLOB`.
    pub fn set_name(mut self, cmp: CmpType, value: impl Into<String>) -> Result<Self, QueryError> {
        require_name_or_glob(cmp)?;
        self.name = Some(Atom { cmp, value: value.into() });
        Ok(self)
    }

    /// Sets the `provides` field; `cmp` must be `EQ` or `GLOB`.
    pub fn set_provides(mut self, cmp: CmpType, value: impl Into<String>) -> Result<Self, QueryError> {
        require_name_or_glob(cmp)?;
        self.provides = Some(Atom { cmp, value: value.into() });
        Ok(self)
    }

    /// Sets the `file` field; `cmp` must be `EQ` or `GLOB`.
    pub fn set_file(mut self, cmp: CmpType, value: impl Into<String>) -> Result<Self, QueryError> {
        require_name_or_glob(cmp)?;
        self.file = Some(Atom { cmp, value: value.into() });
        Ok(self)
    }

    /// Sets the `arch` field (EQ only). Validated against the arch
    /// grammar immediately (spec.md §4.6 step 3 `INVALID_ARCHITECTURE`).
    pub fn set_arch(mut self, arch: impl Into<String>) -> Result<Self, QueryError> {
        let arch = arch.into();
        validate_arch(&arch).map_err(|e| QueryError::InvalidArchitecture(e.to_string()))?;
        self.arch = Some(arch);
        Ok(self)
    }

    /// Sets the `evr` field (EQ only).
    pub fn set_evr(mut self, evr: impl Into<String>) -> Self {
        self.evr = Some(evr.into());
        self
    }

    /// Sets the `reponame` field (EQ only).
    pub fn set_reponame(mut self, reponame: impl Into<String>) -> Self {
        self.reponame = Some(reponame.into());
        self
    }

    /// Compiles this selector to the set of solvables it selects (spec.md
    /// §4.6). `BAD_SELECTOR` if none of `{name, provides, file}` is set.
    pub fn resolve<C: SackView>(&self, ctx: &C) -> Result<PackageSet, QueryError> {
        if self.name.is_none() && self.provides.is_none() && self.file.is_none() {
            return Err(QueryError::BadSelector(
                "selector must set at least one of name, provides, file".to_string(),
            ));
        }
        let mut query = Query::new(ctx).ignore_excludes(true);
        if let Some(atom) = &self.name {
            query.filter_str(Keyname::Name, atom.cmp, atom.value.clone())?;
        }
        if let Some(atom) = &self.provides {
            query.filter_str(Keyname::Provides, atom.cmp, atom.value.clone())?;
        }
        if let Some(atom) = &self.file {
            query.filter_str(Keyname::File, atom.cmp, atom.value.clone())?;
        }
        if let Some(arch) = &self.arch {
            query.filter_str(Keyname::Arch, CmpType::EQ, arch.clone())?;
        }
        if let Some(evr) = &self.evr {
            query.filter_str(Keyname::Evr, CmpType::EQ, evr.clone())?;
        }
        if let Some(reponame) = &self.reponame {
            query.filter_str(Keyname::Reponame, CmpType::EQ, reponame.clone())?;
        }
        query.apply()
    }
}

fn require_name_or_glob(cmp: CmpType) -> Result<(), QueryError> {
    if cmp.base() == Some(CmpType::EQ) || cmp.base() == Some(CmpType::GLOB) {
        Ok(())
    } else {
        Err(QueryError::BadSelector("field only accepts EQ or GLOB".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selector_rejected() {
        // No sack needed: the required-field check runs before any pool
        // access.
        let selector = Selector::new().set_arch("x86_64").unwrap();
        struct NoopCtx;
        impl SackView for NoopCtx {
            fn pool(&self) -> &pkgsack_pool::Pool {
                unreachable!()
            }
            fn considered(&self) -> PackageSet {
                unreachable!()
            }
            fn advisories(&self) -> &[pkgsack_types::advisory::Advisory] {
                unreachable!()
            }
        }
        let err = selector.resolve(&NoopCtx).unwrap_err();
        assert!(matches!(err, QueryError::BadSelector(_)));
    }

    #[test]
    fn test_invalid_arch_rejected_at_set_time() {
        assert!(Selector::new().set_arch("bad arch").is_err());
    }
}
