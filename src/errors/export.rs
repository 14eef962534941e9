//! Exporter errors
//!
//! An export that fails leaves nothing behind: rendering happens fully in
//! memory before anything is written.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the raw and graph exporters
#[derive(Error, Debug)]
pub enum ExportError {
    /// An entity record could not be serialized
    #[error("Failed to serialize record for '{reference}': {source}")]
    Serialization {
        reference: String,
        #[source]
        source: serde_json::Error,
    },

    /// The graph template failed to render
    #[error("Template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Writing the artifact failed
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
