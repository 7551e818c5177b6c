use dqlc_util::DynamicQueryError;

/// Raised by [`crate::filter_by`]/[`crate::compile_filter`]. Clause-level
/// argument validation is kept separate from compiler diagnostics: the
/// former never reaches the lexer.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("{0}")]
    Argument(String),
    #[error(transparent)]
    Compile(#[from] DynamicQueryError),
}

/// Raised by [`crate::sort_by`]/[`crate::compile_sort`]. Sort-clause shape
/// and field-name validation are argument errors, not compiler
/// diagnostics, since the sort-clause grammar is its own small compiler
/// that never touches `dqlc-lex`/`dqlc-par`.
#[derive(Debug, thiserror::Error)]
pub enum SortingError {
    #[error("{0}")]
    Argument(String),
    #[error(transparent)]
    Compile(#[from] DynamicQueryError),
}
