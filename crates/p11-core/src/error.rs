use thiserror::Error;

use crate::attributes::AttributeId;

pub type TableResult<T> = Result<T, TableError>;

/// Reasons an attribute table cannot be built or fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("attribute name must not be empty (code {code:#010x})")]
    EmptyName { code: AttributeId },
    #[error("attribute {name} uses the reserved not-found code {code:#010x}")]
    ReservedCode { name: String, code: AttributeId },
    #[error("duplicate attribute name {name} (codes {first:#010x} and {second:#010x})")]
    DuplicateName {
        name: String,
        first: AttributeId,
        second: AttributeId,
    },
    #[error("attribute table is not sorted at {name}")]
    Unsorted { name: String },
}

impl TableError {
    pub fn duplicate<S: Into<String>>(name: S, first: AttributeId, second: AttributeId) -> Self {
        Self::DuplicateName {
            name: name.into(),
            first,
            second,
        }
    }

    pub fn reserved<S: Into<String>>(name: S, code: AttributeId) -> Self {
        Self::ReservedCode {
            name: name.into(),
            code,
        }
    }
}
