//! Facade crate: `FilterBy`/`SortBy` over the lexer/parser/rebalancer/
//! transformer pipeline, wired to the reference `dqlc-eval` adapter.
//!
//! Re-exports the surface callers actually implement (`Record`,
//! `FieldValue`, `FieldType`) so a consumer depends on `dqlc` alone.

mod error;
mod filter;
mod sort;
mod sort_clause;

pub use dqlc_sem::{FieldTable, FieldValue, Record};
pub use dqlc_util::FieldType;
pub use error::{FilterError, SortingError};
pub use filter::{compile_filter, filter_by, CompiledFilter};
pub use sort::{compile_sort, sort_by, CompiledSort};
