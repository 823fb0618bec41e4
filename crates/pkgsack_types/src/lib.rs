#![deny(missing_docs)]

//! `pkgsack_types` contains the data model shared by the rest of the
//! `pkgsack` workspace: EVR parsing and ordering, reldep atoms, NEVRA
//! rendering, subject-string decomposition, advisory records and package
//! checksums. The crate itself does no interning, indexing or I/O — those
//! belong to `pkgsack_pool` and `pkgsack_query` respectively.

pub mod advisory;
pub mod arch;
pub mod checksum;
pub mod error;
pub mod evr;
pub mod name;
pub mod nevra;
pub mod reldep;
pub mod subject;

pub use error::TypesError;
pub use evr::Evr;
pub use name::Name;
pub use nevra::Nevra;
pub use reldep::{Reldep, ReldepFlags};
