use thiserror::Error;

use super::types::Field;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("unknown field: {0}")]
    Unknown(String),
    #[error("invalid number for {field}: {raw:?}")]
    Parse { field: Field, raw: String },
}
