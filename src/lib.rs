//! Reconstructs the access graph linking Kubernetes workload identities to
//! AWS IAM roles from a traversal trace, and exports it as raw records or as
//! a DOT digraph.

pub mod common;
pub mod config;
pub mod correlation;
pub mod errors;
pub mod export;
pub mod graph;
pub mod model;
pub mod reference;
pub mod services;
pub mod trace;

pub use correlation::{correlate, Correlator, Edge, EdgeLabel, JoinRule};
pub use graph::{AccessGraph, EntityRecord};
pub use reference::{decode, encode, Kind, TypedRef};
pub use trace::Trace;
