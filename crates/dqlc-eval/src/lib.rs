//! Reference host adapter: the only crate in the workspace that actually
//! runs a compiled expression against data, rather than compiling text
//! into one. `dqlc-lex`/`dqlc-par`/`dqlc-sem` stay pure text-to-tree
//! compilers; this crate exists so `FilterBy`/`SortBy` results are
//! independently testable without a caller's own collection type.

mod predicate;
mod sort;

pub use predicate::evaluate;
pub use sort::{compare, sort_by_keys, SortKey};
