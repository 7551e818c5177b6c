use dqlc_util::FieldType;
use indexmap::IndexMap;

use crate::value::FieldValue;

/// The caller-supplied schema and accessor for "the current record",
/// substituting for reflection-based enumeration of a record type's public
/// properties with a trait the host implements once per domain type.
pub trait Record {
    /// The name quoted in "not a public member of '<record>'" diagnostics.
    fn type_name() -> &'static str;

    /// The declared type of a public field, or `None` if no such field
    /// exists.
    fn field_type(name: &str) -> Option<FieldType>;

    /// The field's value for a bound instance, used only by the reference
    /// evaluator — the transformer itself never calls this.
    fn field_value(&self, name: &str) -> FieldValue;
}

/// An ordered name-to-type table, handed to `Record` implementors so they
/// do not need to hand-write `field_type`'s match arms.
#[derive(Clone, Debug, Default)]
pub struct FieldTable(IndexMap<&'static str, FieldType>);

impl FieldTable {
    pub fn new() -> Self {
        FieldTable(IndexMap::new())
    }

    pub fn field(mut self, name: &'static str, ty: FieldType) -> Self {
        self.0.insert(name, ty);
        self
    }

    pub fn get(&self, name: &str) -> Option<FieldType> {
        self.0.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_table_looks_up_by_name() {
        let table = FieldTable::new()
            .field("Id", FieldType::Int)
            .field("Name", FieldType::String);
        assert_eq!(table.get("Id"), Some(FieldType::Int));
        assert_eq!(table.get("Name"), Some(FieldType::String));
        assert_eq!(table.get("Missing"), None);
    }
}
