mod builtins;
mod record;
mod transformer;
mod typed_expr;
mod value;

pub use record::{FieldTable, Record};
pub use transformer::transform;
pub use typed_expr::{BinaryOp, StringMethod, TypedExpr, UnaryOp};
pub use value::FieldValue;
