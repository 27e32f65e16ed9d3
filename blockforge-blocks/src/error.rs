//! Error types for block definition operations

use thiserror::Error;

/// Result type for block operations
pub type Result<T> = std::result::Result<T, BlockError>;

/// Errors that can occur while mutating or loading block definitions
#[derive(Debug, Error)]
pub enum BlockError {
    /// Field not found by name within its sibling scope
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// Control name not present in the registry
    #[error("unknown control: {name}")]
    UnknownControl { name: String },

    /// Location name outside the fixed location set
    #[error("invalid location: {location}")]
    InvalidLocation { location: String },

    /// Rename would collide with an existing sibling
    #[error("duplicate field name: {name}")]
    DuplicateName { name: String },

    /// Persisted document fails schema validation
    #[error("malformed block definition: {reason}")]
    MalformedDefinition { reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<blockforge_controls::ControlsError> for BlockError {
    fn from(err: blockforge_controls::ControlsError) -> Self {
        match err {
            blockforge_controls::ControlsError::UnknownControl { name } => {
                BlockError::UnknownControl { name }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BlockError::FieldNotFound {
            name: "price".into(),
        };
        assert_eq!(err.to_string(), "field not found: price");

        let err = BlockError::DuplicateName {
            name: "price-2".into(),
        };
        assert!(err.to_string().contains("price-2"));
    }

    #[test]
    fn controls_error_converts() {
        let err: BlockError = blockforge_controls::ControlsError::UnknownControl {
            name: "carousel".into(),
        }
        .into();
        assert!(matches!(err, BlockError::UnknownControl { .. }));
    }
}
