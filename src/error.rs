//! Result and error types for the generation library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for library operations
pub type CsbResult<T> = Result<T, CsbError>;

/// Errors that can occur while generating or loading projects
#[derive(Debug, Error)]
pub enum CsbError {
    /// A template failed to parse
    #[error("Failed to register template '{name}': {source}")]
    TemplateRegister {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A template failed to render
    #[error("Failed to render template '{name}': {source}")]
    TemplateRender {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// No element with this id
    #[error("Unknown element id: {0}")]
    UnknownElement(String),

    /// No step entry with this id
    #[error("Unknown step id: {0}")]
    UnknownStep(String),

    /// Project file extension is neither YAML nor JSON
    #[error("Unsupported project format for {path}: expected .yml, .yaml or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Project file could not be parsed
    #[error("Invalid project {path}: {message}")]
    InvalidProject { path: PathBuf, message: String },

    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CsbError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CsbError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_project(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        CsbError::InvalidProject {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
