use std::cmp::Ordering;

use dqlc_sem::{FieldValue, Record};

/// One parsed `SortBy` key: a field name plus its direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub ascending: bool,
}

/// Composes `keys` into a single stable comparator, applied key by key
/// until one produces a non-equal `Ordering`: one multi-key comparator,
/// not sequential `OrderBy`/`OrderByDescending` calls, so later keys only
/// break ties left by earlier ones.
pub fn compare<R: Record>(keys: &[SortKey], a: &R, b: &R) -> Ordering {
    for key in keys {
        let ordering = compare_values(&a.field_value(&key.field), &b.field_value(&key.field));
        let ordering = if key.ascending { ordering } else { ordering.reverse() };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Null, _) => Ordering::Less,
        (_, FieldValue::Null) => Ordering::Greater,
        (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
        (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
        (FieldValue::Double(a), FieldValue::Double(b)) => a.total_cmp(b),
        (FieldValue::Char(a), FieldValue::Char(b)) => a.cmp(b),
        (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
        (a, b) => panic!("sort key produced mismatched value types: {a:?} vs {b:?}"),
    }
}

/// Sorts `records` in place using [`compare`]. Wraps [`slice::sort_by`],
/// which is a stable merge sort, so equal-key records keep their relative
/// input order.
pub fn sort_by_keys<R: Record>(records: &mut [R], keys: &[SortKey]) {
    records.sort_by(|a, b| compare(keys, a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use dqlc_sem::FieldTable;
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
    fn scenario_9_sorts_by_a_single_ascending_key() {
        let mut people = vec![
            Person { id: 3, name: "C".into() },
            Person { id: 1, name: "A".into() },
            Person { id: 2, name: "B".into() },
        ];
        sort_by_keys(&mut people, &[SortKey { field: "Id".into(), ascending: true }]);
        assert_eq!(people.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn a_second_key_only_breaks_ties_left_by_the_first() {
        let mut people = vec![
            Person { id: 1, name: "B".into() },
            Person { id: 1, name: "A".into() },
            Person { id: 0, name: "Z".into() },
        ];
        sort_by_keys(
            &mut people,
            &[
                SortKey { field: "Id".into(), ascending: true },
                SortKey { field: "Name".into(), ascending: true },
            ],
        );
        assert_eq!(
            people.iter().map(|p| (p.id, p.name.clone())).collect::<Vec<_>>(),
            vec![(0, "Z".into()), (1, "A".into()), (1, "B".into())]
        );
    }

    #[test]
    fn descending_reverses_the_comparison() {
        let mut people = vec![Person { id: 1, name: String::new() }, Person { id: 2, name: String::new() }];
        sort_by_keys(&mut people, &[SortKey { field: "Id".into(), ascending: false }]);
        assert_eq!(people.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2, 1]);
    }
}
