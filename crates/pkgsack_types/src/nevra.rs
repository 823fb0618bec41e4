//! NEVRA: name-epoch-version-release-arch, the full package identity
//! (spec.md §3, §6).

use std::fmt;

use crate::evr::Evr;

/// A fully-resolved NEVRA, as carried by an actual package.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Nevra {
    name: String,
    evr: Evr,
    arch: String,
}

impl Nevra {
    /// Builds a NEVRA from its parts.
    pub fn new(name: impl Into<String>, evr: Evr, arch: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            evr,
            arch: arch.into(),
        }
    }

    /// The package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The epoch/version/release.
    pub fn evr(&self) -> &Evr {
        &self.evr
    }

    /// The architecture.
    pub fn arch(&self) -> &str {
        &self.arch
    }
}

impl fmt::Display for Nevra {
    /// Canonical rendering: `name-[epoch:]version-release.arch`, epoch
    /// omitted iff zero (spec.md §6).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}.{}", self.name, self.evr, self.arch)
    }
}
