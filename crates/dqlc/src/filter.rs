use std::marker::PhantomData;

use dqlc_sem::{Record, TypedExpr};
use dqlc_util::FieldType;

use crate::error::FilterError;

/// A filter clause compiled once against `R`'s schema, ready to be applied
/// to many records without recompiling.
#[derive(Debug)]
pub struct CompiledFilter<R> {
    expr: TypedExpr,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> CompiledFilter<R> {
    pub fn matches(&self, record: &R) -> bool {
        matches!(dqlc_eval::evaluate(&self.expr, record), dqlc_sem::FieldValue::Bool(true))
    }
}

/// Compiles `clause` into a reusable [`CompiledFilter`], splitting a
/// `FilterBy`-style contract into a compile step and an apply step.
pub fn compile_filter<R: Record>(clause: &str) -> Result<CompiledFilter<R>, FilterError> {
    if clause.trim().is_empty() {
        return Err(FilterError::Argument("Filter clause cannot be null or empty.".to_string()));
    }

    let tokens = dqlc_lex::lex(clause)?;
    let tree = dqlc_par::rebalance(dqlc_par::parse(&tokens)?);
    let expr = dqlc_sem::transform::<R>(&tree, FieldType::Bool)?;
    Ok(CompiledFilter {
        expr,
        _record: PhantomData,
    })
}

/// Filters `source` by `clause`, compiling it once and discarding the
/// compiled form — use [`compile_filter`] directly when the same clause
/// will be applied to more than one collection.
pub fn filter_by<'a, R: Record>(source: &'a [R], clause: &str) -> Result<Vec<&'a R>, FilterError> {
    let compiled = compile_filter::<R>(clause)?;
    Ok(source.iter().filter(|record| compiled.matches(record)).collect())
}
