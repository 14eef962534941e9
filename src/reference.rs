use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ReferenceError, ReferenceResult};

/// The closed set of entity kinds held in the access graph.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Kind {
    Pod,
    ServiceAccount,
    Secret,
    Role,
    Policy,
}

impl Kind {
    pub const ALL: [Kind; 5] = [
        Kind::Pod,
        Kind::ServiceAccount,
        Kind::Secret,
        Kind::Role,
        Kind::Policy,
    ];

    /// Label used in the `"[kind] key"` wire form.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Pod => "Kubernetes pod",
            Kind::ServiceAccount => "Kubernetes service account",
            Kind::Secret => "Kubernetes secret",
            Kind::Role => "IAM role",
            Kind::Policy => "IAM policy",
        }
    }

    pub fn from_label(label: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Short identifier, safe for use in DOT ids.
    pub fn slug(&self) -> &'static str {
        match self {
            Kind::Pod => "pod",
            Kind::ServiceAccount => "service_account",
            Kind::Secret => "secret",
            Kind::Role => "role",
            Kind::Policy => "policy",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Produces the canonical `"[kind] key"` form.
pub fn encode(kind: &str, key: &str) -> String {
    format!("[{}] {}", kind, key)
}

/// Splits a reference at its first `]` into kind text and key.
///
/// The kind loses its leading `[` and surrounding whitespace; the key loses
/// leading whitespace only. A key containing `]` survives intact here, but
/// such keys cannot round-trip through [`encode`] reliably and are not
/// supported.
pub fn decode(reference: &str) -> ReferenceResult<(&str, &str)> {
    let (kind, key) = reference
        .split_once(']')
        .ok_or_else(|| ReferenceError::Malformed {
            reference: reference.to_string(),
        })?;
    let kind = kind.trim();
    let kind = kind.strip_prefix('[').unwrap_or(kind).trim();
    Ok((kind, key.trim_start()))
}

/// A (kind, key) pair identifying one entity in the store.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TypedRef {
    pub kind: Kind,
    pub key: String,
}

impl TypedRef {
    pub fn new(kind: Kind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }

    pub fn pod(key: impl Into<String>) -> Self {
        Self::new(Kind::Pod, key)
    }

    pub fn service_account(key: impl Into<String>) -> Self {
        Self::new(Kind::ServiceAccount, key)
    }

    pub fn secret(key: impl Into<String>) -> Self {
        Self::new(Kind::Secret, key)
    }

    pub fn role(key: impl Into<String>) -> Self {
        Self::new(Kind::Role, key)
    }

    pub fn policy(key: impl Into<String>) -> Self {
        Self::new(Kind::Policy, key)
    }
}

impl fmt::Display for TypedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.kind.label(), &self.key))
    }
}

impl FromStr for TypedRef {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, key) = decode(s)?;
        let kind = Kind::from_label(kind).ok_or_else(|| ReferenceError::UnknownKind {
            kind: kind.to_string(),
            reference: s.to_string(),
        })?;
        Ok(TypedRef::new(kind, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_canonical_form() {
        assert_eq!(
            encode("Kubernetes service account", "default:s3-echoer"),
            "[Kubernetes service account] default:s3-echoer"
        );
        assert_eq!(
            TypedRef::role("arn:aws:iam::1:role/r1").to_string(),
            "[IAM role] arn:aws:iam::1:role/r1"
        );
    }

    #[test]
    fn decode_inverts_encode() {
        for kind in Kind::ALL {
            let text = encode(kind.label(), "ns:name-1");
            assert_eq!(decode(&text).unwrap(), (kind.label(), "ns:name-1"));
        }
        assert_eq!(decode(&encode("x", "")).unwrap(), ("x", ""));
    }

    #[test]
    fn decode_trims_kind_and_leading_key_whitespace() {
        assert_eq!(
            decode("  [ IAM policy ]    arn:aws:iam::aws:policy/ReadOnly").unwrap(),
            ("IAM policy", "arn:aws:iam::aws:policy/ReadOnly")
        );
    }

    #[test]
    fn decode_splits_at_first_bracket() {
        assert_eq!(decode("[a] b]c").unwrap(), ("a", "b]c"));
    }

    #[test]
    fn decode_without_delimiter_is_malformed() {
        let err = decode("[Kubernetes pod ns:p1").unwrap_err();
        assert_eq!(
            err,
            ReferenceError::Malformed {
                reference: "[Kubernetes pod ns:p1".into()
            }
        );
    }

    #[test]
    fn parses_typed_refs() {
        let r: TypedRef = "[Kubernetes secret] ns:token".parse().unwrap();
        assert_eq!(r, TypedRef::secret("ns:token"));
        for kind in Kind::ALL {
            let r = TypedRef::new(kind, "k");
            assert_eq!(r.to_string().parse::<TypedRef>().unwrap(), r);
        }
    }

    #[test]
    fn unknown_kind_is_reported() {
        let err = "[EC2 instance] i-123".parse::<TypedRef>().unwrap_err();
        assert!(err.is_unknown_kind());
    }
}
