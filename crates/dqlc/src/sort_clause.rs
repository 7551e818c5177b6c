use dqlc_eval::SortKey;
use dqlc_sem::Record;

use crate::error::SortingError;

/// Parses a `SortBy` clause into the keys the stable multi-key comparator
/// composes. This is the "trivial" sort-clause grammar: comma separated
/// items, each `field[ ASC|DESC]`, case-insensitive direction, defaulting
/// to `ASC`.
pub fn parse_sort_clause<R: Record>(clause: &str) -> Result<Vec<SortKey>, SortingError> {
    if clause.trim().is_empty() {
        return Err(SortingError::Argument("Sorting clause cannot be null or empty.".to_string()));
    }

    clause.split(',').map(|item| parse_sort_item::<R>(item)).collect()
}

fn parse_sort_item<R: Record>(item: &str) -> Result<SortKey, SortingError> {
    let words: Vec<&str> = item.trim().split_whitespace().collect();
    let (field, ascending) = match words.as_slice() {
        [field] => (*field, true),
        [field, direction] => (*field, parse_direction(direction)?),
        _ => return Err(shape_error()),
    };

    if field.is_empty() {
        return Err(shape_error());
    }
    if R::field_type(field).is_none() {
        return Err(SortingError::Argument(format!(
            "'{field}' is not a valid field for '{}'.",
            R::type_name()
        )));
    }

    Ok(SortKey {
        field: field.to_string(),
        ascending,
    })
}

fn parse_direction(direction: &str) -> Result<bool, SortingError> {
    match direction.to_ascii_uppercase().as_str() {
        "ASC" => Ok(true),
        "DESC" => Ok(false),
        _ => Err(shape_error()),
    }
}

fn shape_error() -> SortingError {
    SortingError::Argument(
        "Sorting item must be in the format of 'field[ ASC]' or 'field DESC'.".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqlc_sem::{FieldTable, FieldValue};
    use dqlc_util::FieldType;

    struct Person;

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

        fn field_value(&self, _name: &str) -> FieldValue {
            FieldValue::Null
        }
    }

    #[test]
    fn scenario_9_sort_clause_composes_descending_and_ascending_keys() {
        let keys = parse_sort_clause::<Person>("Name DESC, Id").unwrap();
        assert_eq!(
            keys,
            vec![
                SortKey { field: "Name".to_string(), ascending: false },
                SortKey { field: "Id".to_string(), ascending: true },
            ]
        );
    }

    #[test]
    fn blank_clause_is_an_argument_error() {
        let err = parse_sort_clause::<Person>("   ").unwrap_err();
        assert_eq!(err.to_string(), "Sorting clause cannot be null or empty.");
    }

    #[test]
    fn unknown_field_is_reported_with_the_record_type_name() {
        let err = parse_sort_clause::<Person>("Bogus").unwrap_err();
        assert_eq!(err.to_string(), "'Bogus' is not a valid field for 'Person'.");
    }

    #[test]
    fn three_word_item_is_a_shape_error() {
        let err = parse_sort_clause::<Person>("Id ASC garbage").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sorting item must be in the format of 'field[ ASC]' or 'field DESC'."
        );
    }

    #[test]
    fn invalid_direction_is_a_shape_error() {
        let err = parse_sort_clause::<Person>("Id SIDEWAYS").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sorting item must be in the format of 'field[ ASC]' or 'field DESC'."
        );
    }
}
