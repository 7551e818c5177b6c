use std::marker::PhantomData;

use dqlc_eval::SortKey;
use dqlc_sem::Record;

use crate::error::SortingError;
use crate::sort_clause::parse_sort_clause;

/// A sort clause compiled once against `R`'s schema, ready to order many
/// slices without re-parsing.
pub struct CompiledSort<R> {
    keys: Vec<SortKey>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record + Clone> CompiledSort<R> {
    pub fn apply(&self, source: &[R]) -> Vec<R> {
        let mut out = source.to_vec();
        dqlc_eval::sort_by_keys(&mut out, &self.keys);
        out
    }
}

/// Compiles `clause` into a reusable [`CompiledSort`], splitting a
/// `SortBy`-style contract into a compile step and an apply step.
pub fn compile_sort<R: Record>(clause: &str) -> Result<CompiledSort<R>, SortingError> {
    let keys = parse_sort_clause::<R>(clause)?;
    Ok(CompiledSort {
        keys,
        _record: PhantomData,
    })
}

/// Orders `source` by `clause`, compiling it once and discarding the
/// compiled form.
pub fn sort_by<R: Record + Clone>(source: &[R], clause: &str) -> Result<Vec<R>, SortingError> {
    let compiled = compile_sort::<R>(clause)?;
    Ok(compiled.apply(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqlc_sem::{FieldTable, FieldValue};
    use dqlc_util::FieldType;

    #[derive(Clone, Debug, PartialEq)]
    struct Person {
        id: i64,
        name: String,
    }

    impl Record for Person {
        fn type_name() -> &'static str {
            "Person"
        }

        fn field_type(name: &str) -> Option<FieldType> {
            FieldTable::new()
                .field("Id", FieldType::Int)
                .field("Name", FieldType::String)
                .get(name)
        }

        fn field_value(&self, name: &str) -> FieldValue {
            match name {
                "Id" => FieldValue::Int(self.id),
                "Name" => FieldValue::String(self.name.clone()),
                other => panic!("unknown field {other}"),
            }
        }
    }

    #[test]
    fn scenario_9_end_to_end_sort_orders_by_name_descending_then_id_ascending() {
        let people = vec![
            Person { id: 1, name: "001".into() },
            Person { id: 2, name: "003".into() },
            Person { id: 3, name: "004".into() },
            Person { id: 4, name: "005".into() },
            Person { id: 5, name: "002".into() },
        ];
        let sorted = sort_by(&people, "Name DESC, Id").unwrap();
        assert_eq!(
            sorted.iter().map(|p| p.name.clone()).collect::<Vec<_>>(),
            vec!["005", "004", "003", "002", "001"]
        );
    }
}
