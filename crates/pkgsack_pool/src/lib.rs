#![deny(missing_docs)]

//! The pool: interned ids, the solvable arena, repo model and bitmap
//! package sets that the rest of the `pkgsack` workspace is built on
//! (spec.md components C1, C2, C5).

mod error;
mod ids;
mod interner;
mod package_set;
mod pool;
mod record;
mod repo;

pub use error::PoolError;
pub use ids::{RepoId, SolvableId, StringId, ReldepId, SYSTEM_SOLVABLE};
pub use package_set::PackageSet;
pub use pool::Pool;
pub use record::{PackageRecord, ReldepLists};
pub use repo::Repo;
