//! Registry errors.

use quiver_diagnostic::ErrorCode;

/// Failure to register a datatype or resolve a constructor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("datatype `{name}` is already defined")]
    DuplicateType { name: String },

    #[error("constructor `{constructor}` of `{datatype}` is already defined by `{existing}`")]
    DuplicateConstructor {
        constructor: String,
        datatype: String,
        existing: String,
    },

    #[error("unknown constructor `{name}`")]
    UnknownConstructor { name: String },

    #[error("field {field} of constructor `{constructor}` has unknown type `{name}`")]
    UnknownType {
        constructor: String,
        field: usize,
        name: String,
    },
}

impl RegistryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::DuplicateType { .. } => ErrorCode::E1001,
            RegistryError::DuplicateConstructor { .. } => ErrorCode::E1002,
            RegistryError::UnknownConstructor { .. } => ErrorCode::E1003,
            RegistryError::UnknownType { .. } => ErrorCode::E1004,
        }
    }
}
