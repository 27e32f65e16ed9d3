//! Error types for template rendering

use thiserror::Error;

/// Result type for templating operations
pub type Result<T> = std::result::Result<T, TemplatingError>;

/// Errors that can occur while parsing or rendering block templates.
///
/// Per-field value resolution never errors — a bad field degrades to an
/// empty representation so one field cannot blank a whole rendered block.
#[derive(Debug, Error)]
pub enum TemplatingError {
    /// Template failed to parse
    #[error("template parse error: {0}")]
    Parse(String),

    /// Template failed to render
    #[error("template render error: {0}")]
    Render(String),

    /// No template is registered for the block
    #[error("no template found for block: {block}")]
    TemplateNotFound { block: String },
}
