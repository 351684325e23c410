mod field;
mod kind;

pub use field::{Field, FieldId, FieldStatus};
pub use kind::{FieldType, ParseFieldTypeError};
