use dqlc_util::FieldType;

/// A runtime value flowing through the typed expression tree: the
/// evaluator's counterpart to the lexer's literal payload.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Char(char),
    String(String),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Null => FieldType::Object,
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Double(_) => FieldType::Double,
            FieldValue::Char(_) => FieldType::Char,
            FieldValue::String(_) => FieldType::String,
        }
    }
}

impl From<dqlc_lex::LiteralValue> for FieldValue {
    fn from(value: dqlc_lex::LiteralValue) -> Self {
        match value {
            dqlc_lex::LiteralValue::Null => FieldValue::Null,
            dqlc_lex::LiteralValue::Bool(b) => FieldValue::Bool(b),
            dqlc_lex::LiteralValue::Int(i) => FieldValue::Int(i),
            dqlc_lex::LiteralValue::Double(d) => FieldValue::Double(d),
            dqlc_lex::LiteralValue::Char(c) => FieldValue::Char(c),
            dqlc_lex::LiteralValue::String(s) => FieldValue::String(s),
        }
    }
}
