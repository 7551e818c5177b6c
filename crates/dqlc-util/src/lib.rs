//! Shared vocabulary for the dynamic query compiler: source positions
//! (`Span`), the field-type lattice (`FieldType`), and the single
//! diagnostic kind (`DynamicQueryError`) every compiler stage raises.

mod error;
mod field_type;
mod span;

pub use error::{DynamicQueryError, Result};
pub use field_type::FieldType;
pub use span::Span;
