//! Error types for the access graph engine
//!
//! Each concern gets its own error enum so callers can tell a bad trace entry
//! apart from a corrupt store artifact or a failed export.
//!
//! # Error Categories
//!
//! - **ReferenceError**: typed reference decoding (`"[kind] key"`)
//! - **StoreError**: entity store persistence (save/restore, dump/load)
//! - **ExportError**: raw and graph exporters
//!
//! # Examples
//!
//! ```rust
//! use rbiam::errors::ReferenceError;
//!
//! let err = ReferenceError::Malformed {
//!     reference: "Kubernetes pod default:web".to_string(),
//! };
//! assert!(err.to_string().contains("default:web"));
//! ```

pub mod export;
pub mod reference;
pub mod store;

pub use export::ExportError;
pub use reference::ReferenceError;
pub use store::StoreError;

/// Result type alias for typed reference decoding
pub type ReferenceResult<T> = Result<T, ReferenceError>;

/// Result type alias for entity store persistence
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for exporters
pub type ExportResult<T> = Result<T, ExportError>;
