//! Error types for the rendering engine

use shared::ValidationError;
use thiserror::Error;

/// Rendering error types
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// The record violates a construction invariant
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unrecognized template id
    #[error("unknown template '{requested}', valid templates: {}", valid.join(", "))]
    UnknownTemplate {
        requested: String,
        valid: Vec<&'static str>,
    },
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
