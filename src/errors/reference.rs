//! Typed reference errors
//!
//! ```rust
//! use rbiam::errors::ReferenceError;
//!
//! let err = ReferenceError::UnknownKind {
//!     kind: "EC2 instance".to_string(),
//!     reference: "[EC2 instance] i-0abc".to_string(),
//! };
//! assert!(err.is_unknown_kind());
//! ```

use thiserror::Error;

/// Errors raised while decoding a `"[kind] key"` reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// The reference has no `]` and cannot be split into kind and key
    #[error("Malformed reference '{reference}': expected '[kind] key'")]
    Malformed { reference: String },

    /// The kind portion is not one of the known entity kinds
    #[error("Unknown entity kind '{kind}' in reference '{reference}'")]
    UnknownKind { kind: String, reference: String },
}

impl ReferenceError {
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, ReferenceError::UnknownKind { .. })
    }

    /// The offending reference text
    pub fn reference(&self) -> &str {
        match self {
            ReferenceError::Malformed { reference } => reference,
            ReferenceError::UnknownKind { reference, .. } => reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_names_the_reference() {
        let err = ReferenceError::Malformed {
            reference: "no delimiter".into(),
        };
        assert_eq!(err.reference(), "no delimiter");
        assert!(!err.is_unknown_kind());
        assert!(err.to_string().contains("no delimiter"));
    }

    #[test]
    fn unknown_kind_names_the_kind() {
        let err = ReferenceError::UnknownKind {
            kind: "EC2 instance".into(),
            reference: "[EC2 instance] i-1".into(),
        };
        assert!(err.is_unknown_kind());
        assert!(err.to_string().contains("EC2 instance"));
    }
}
