#![deny(missing_docs)]

//! The sack: the top-level package universe, tying the pool, query engine
//! and goal solver together behind one owning type (spec.md §3 "Sack",
//! component C3).

mod config;
mod error;
mod kernel;
mod metadata;
mod package_id;
mod sack;

pub use config::{LoadFlags, SackConfig};
pub use error::SackError;
pub use kernel::{host_kernel_release, split_release};
pub use metadata::{PackageMetadata, RepoMetadata};
pub use package_id::{parse as parse_package_id, ParsedPackageId};
pub use sack::Sack;
