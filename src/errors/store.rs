//! Entity store persistence errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while saving or restoring the entity store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The artifact could not be parsed into the five-collection shape
    #[error("Malformed store artifact: {source}")]
    MalformedArtifact {
        #[source]
        source: serde_json::Error,
    },

    /// The store could not be serialized
    #[error("Failed to serialize store: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Reading or writing the artifact file failed
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::MalformedArtifact { .. })
    }
}
