#![deny(missing_docs)]

//! Query engine, selector and advisory matcher (spec.md components C7,
//! C8, C10).

mod cmp;
mod context;
mod error;
mod filter;
mod keyname;
mod query;
mod selector;

pub use cmp::CmpType;
pub use context::SackView;
pub use error::QueryError;
pub use filter::{Filter, MatchValue};
pub use keyname::{KeyClass, Keyname};
pub use query::Query;
pub use selector::Selector;
