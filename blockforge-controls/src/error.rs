//! Error types for the control registry

use thiserror::Error;

/// Result type for control registry operations
pub type Result<T> = std::result::Result<T, ControlsError>;

/// Errors that can occur in control registry operations
#[derive(Debug, Error)]
pub enum ControlsError {
    /// Control name not present in the registry
    #[error("unknown control: {name}")]
    UnknownControl { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_control_display() {
        let err = ControlsError::UnknownControl {
            name: "carousel".into(),
        };
        assert_eq!(err.to_string(), "unknown control: carousel");
    }
}
