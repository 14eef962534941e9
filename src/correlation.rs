//! Derives edges between traced entities by joining on convention-based keys.
//!
//! Each [`JoinRule`] relates one source kind to one target kind. Only both
//! endpoints appearing in the trace *and* resolving in the store can produce
//! an edge; dangling references are skipped silently.
//!
//! Not every relationship is derived:
//! - a service account is joined to its first secret only;
//! - a pod is joined to a role only through a container's `AWS_ROLE_ARN`
//!   variable, never through the node's instance profile;
//! - roles are never joined to policies.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::graph::AccessGraph;
use crate::reference::{Kind, TypedRef};
use crate::trace::Trace;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeLabel {
    Uses,
    Has,
    Assumes,
}

impl EdgeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeLabel::Uses => "uses",
            EdgeLabel::Has => "has",
            EdgeLabel::Assumes => "assumes",
        }
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Edge {
    pub source: TypedRef,
    pub target: TypedRef,
    pub label: EdgeLabel,
}

/// A kind-specific predicate relating a source entity to a target entity.
pub trait JoinRule {
    fn source_kind(&self) -> Kind;
    fn target_kind(&self) -> Kind;
    fn label(&self) -> EdgeLabel;

    /// Whether the stored source entity points at `target_key`.
    ///
    /// Returns `false` when the source is not in the store.
    fn joins(&self, store: &AccessGraph, source_key: &str, target_key: &str) -> bool;
}

/// Pod → service account, via the pod's declared service account name.
pub struct PodUsesServiceAccount;

impl JoinRule for PodUsesServiceAccount {
    fn source_kind(&self) -> Kind {
        Kind::Pod
    }

    fn target_kind(&self) -> Kind {
        Kind::ServiceAccount
    }

    fn label(&self) -> EdgeLabel {
        EdgeLabel::Uses
    }

    fn joins(&self, store: &AccessGraph, source_key: &str, target_key: &str) -> bool {
        store
            .pods
            .get(source_key)
            .is_some_and(|pod| pod.service_account_key() == target_key)
    }
}

/// Service account → secret, via the first listed secret only.
pub struct ServiceAccountHasSecret;

impl JoinRule for ServiceAccountHasSecret {
    fn source_kind(&self) -> Kind {
        Kind::ServiceAccount
    }

    fn target_kind(&self) -> Kind {
        Kind::Secret
    }

    fn label(&self) -> EdgeLabel {
        EdgeLabel::Has
    }

    fn joins(&self, store: &AccessGraph, source_key: &str, target_key: &str) -> bool {
        store
            .service_accounts
            .get(source_key)
            .and_then(|sa| sa.first_secret_key())
            .is_some_and(|key| key == target_key)
    }
}

/// Pod → IAM role, via `AWS_ROLE_ARN` in any container's environment.
pub struct PodAssumesRole;

impl JoinRule for PodAssumesRole {
    fn source_kind(&self) -> Kind {
        Kind::Pod
    }

    fn target_kind(&self) -> Kind {
        Kind::Role
    }

    fn label(&self) -> EdgeLabel {
        EdgeLabel::Assumes
    }

    fn joins(&self, store: &AccessGraph, source_key: &str, target_key: &str) -> bool {
        store
            .pods
            .get(source_key)
            .is_some_and(|pod| pod.federated_role_arns().any(|arn| arn == target_key))
    }
}

pub fn default_rules() -> Vec<Box<dyn JoinRule>> {
    vec![
        Box::new(PodUsesServiceAccount),
        Box::new(ServiceAccountHasSecret),
        Box::new(PodAssumesRole),
    ]
}

pub struct Correlator {
    rules: Vec<Box<dyn JoinRule>>,
}

impl Default for Correlator {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Correlator {
    pub fn new(rules: Vec<Box<dyn JoinRule>>) -> Self {
        Self { rules }
    }

    /// Computes the deduplicated edge set for a trace.
    ///
    /// Edges come out grouped by rule, then in first-seen trace order of the
    /// source, then of the target.
    pub fn correlate(&self, trace: &Trace, store: &AccessGraph) -> IndexSet<Edge> {
        let mut edges = IndexSet::new();
        for rule in &self.rules {
            let sources = resolved_of(trace, store, rule.source_kind());
            let targets = resolved_of(trace, store, rule.target_kind());
            for source in &sources {
                for target in &targets {
                    if rule.joins(store, &source.key, &target.key) {
                        edges.insert(Edge {
                            source: (*source).clone(),
                            target: (*target).clone(),
                            label: rule.label(),
                        });
                    }
                }
            }
        }
        debug!("Correlated {} edges from {} trace entries", edges.len(), trace.len());
        edges
    }
}

/// Convenience wrapper running the default rule set.
pub fn correlate(trace: &Trace, store: &AccessGraph) -> IndexSet<Edge> {
    Correlator::default().correlate(trace, store)
}

fn resolved_of<'t>(trace: &'t Trace, store: &AccessGraph, kind: Kind) -> Vec<&'t TypedRef> {
    trace
        .distinct_of(kind)
        .into_iter()
        .filter(|r| {
            let found = store.contains(r);
            if !found {
                debug!("Skipping dangling reference {}", r);
            }
            found
        })
        .collect()
}
