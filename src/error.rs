//! Error types for template loading and rendering.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors surfaced by the template manager.
///
/// Load failures are returned to the caller of [`init`](crate::TemplateManager::init)
/// or [`render`](crate::TemplateManager::render); the manager never aborts the
/// process. Execution failures are terminal for the single render call and
/// nothing is retried.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template name string could not be parsed into a usable environment.
    #[error("invalid template name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("failed to read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse templates for {name:?}: {source}")]
    Parse {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("failed to render template {name:?}: {source}")]
    Render {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// The cache holds no entry for a standardized name that was expected to be
    /// present (e.g. it was evicted between a rebuild and the render).
    #[error("no cached template for {name:?}")]
    NotFound { name: String },

    #[error("failed to write rendered output: {source}")]
    Output {
        #[source]
        source: io::Error,
    },
}
