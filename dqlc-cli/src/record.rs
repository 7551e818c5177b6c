//! The demonstration record type the CLI filters and sorts. A real
//! integration would implement `dqlc::Record` for its own domain type;
//! `Item` stands in for "whatever the caller's collection holds".

use dqlc::{FieldTable, FieldType, FieldValue, Record};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub code: String,
}

impl Record for Item {
    fn type_name() -> &'static str {
        "Item"
    }

    fn field_type(name: &str) -> Option<FieldType> {
        FieldTable::new()
            .field("Id", FieldType::Int)
            .field("Code", FieldType::String)
            .get(name)
    }

    fn field_value(&self, name: &str) -> FieldValue {
        match name {
            "Id" => FieldValue::Int(self.id),
            "Code" => FieldValue::String(self.code.clone()),
            other => panic!("unknown field {other}"),
        }
    }
}
