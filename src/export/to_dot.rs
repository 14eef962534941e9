use serde::Serialize;
use serde_json::json;

use super::style::{style_for, NodeStyle, FONT};
use crate::correlation::{Correlator, Edge, EdgeLabel};
use crate::errors::ExportResult;
use crate::graph::AccessGraph;
use crate::reference::{Kind, TypedRef};
use crate::trace::Trace;

#[derive(Serialize, Debug, Clone, PartialEq)]
struct DotNode {
    id: String,
    label: String,
    style: NodeStyle,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct DotEdge {
    source: String,
    target: String,
    label: &'static str,
    fontname: &'static str,
}

impl From<&Edge> for DotEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            label: edge.label.as_str(),
            fontname: FONT,
        }
    }
}

fn legend_id(kind: Kind) -> String {
    format!("legend_{}", kind.slug())
}

fn legend_nodes() -> Vec<DotNode> {
    Kind::ALL
        .iter()
        .map(|kind| DotNode {
            id: legend_id(*kind),
            label: kind.label().to_string(),
            style: style_for(*kind),
        })
        .collect()
}

/// The four canonical relationships, drawn between legend exemplars.
fn legend_edges() -> Vec<DotEdge> {
    [
        (Kind::Pod, Kind::ServiceAccount, EdgeLabel::Uses),
        (Kind::ServiceAccount, Kind::Secret, EdgeLabel::Has),
        (Kind::Role, Kind::Policy, EdgeLabel::Has),
        (Kind::Pod, Kind::Role, EdgeLabel::Assumes),
    ]
    .into_iter()
    .map(|(source, target, label)| DotEdge {
        source: legend_id(source),
        target: legend_id(target),
        label: label.as_str(),
        fontname: FONT,
    })
    .collect()
}

fn trace_nodes(trace: &Trace) -> Vec<DotNode> {
    trace
        .distinct()
        .into_iter()
        .map(|reference: &TypedRef| DotNode {
            id: reference.to_string(),
            label: reference.key.clone(),
            style: style_for(reference.kind),
        })
        .collect()
}

/// Renders the trace as a styled DOT digraph.
///
/// Every distinct trace entry becomes a node, dangling ones included. Edges
/// come from the correlator and appear at most once per (source, target,
/// label).
pub fn render(trace: &Trace, store: &AccessGraph, legend: bool) -> ExportResult<String> {
    let edges: Vec<DotEdge> = Correlator::default()
        .correlate(trace, store)
        .iter()
        .map(DotEdge::from)
        .collect();

    let handlebars = crate::common::get_handlebars();
    let res = handlebars.render_template(
        &get_template(),
        &json!({
            "legend": legend,
            "legend_nodes": legend_nodes(),
            "legend_edges": legend_edges(),
            "nodes": trace_nodes(trace),
            "edges": edges,
        }),
    )?;
    Ok(res)
}

pub fn get_template() -> String {
    include_str!("to_dot.hbs").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Container, Pod, Policy, Role, ServiceAccount, AWS_ROLE_ARN};

    fn store() -> AccessGraph {
        let mut ag = AccessGraph::new();
        ag.insert_pod(
            Pod::new("ns", "p1")
                .with_service_account("sa1")
                .with_container(Container::new("app").with_env(AWS_ROLE_ARN, "arn:aws:iam::1:role/r1")),
        );
        ag.insert_service_account(ServiceAccount::new("ns", "sa1"));
        ag.insert_role(Role::new("arn:aws:iam::1:role/r1", "r1"));
        ag.insert_policy(Policy::new("arn:aws:iam::aws:policy/S3", "S3"));
        ag
    }

    fn edge_lines(dot: &str) -> Vec<&str> {
        dot.lines()
            .map(str::trim)
            .filter(|l| l.contains("->") && !l.starts_with("\"legend_"))
            .collect()
    }

    #[test]
    fn renders_legend_with_canonical_edges() {
        let dot = render(&Trace::default(), &store(), true).unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("newrank=true;"));
        assert!(dot.contains("subgraph cluster_legend {"));
        assert!(dot.contains("label=\"LEGEND\";"));
        assert!(dot.contains(
            "\"legend_pod\" -> \"legend_service_account\" [label=\"uses\" fontname=\"Helvetica\"];"
        ));
        assert!(dot.contains(
            "\"legend_role\" -> \"legend_policy\" [label=\"has\" fontname=\"Helvetica\"];"
        ));
        assert!(dot.contains("\"legend_pod\" -> \"legend_role\" [label=\"assumes\""));
        assert!(edge_lines(&dot).is_empty());
    }

    #[test]
    fn legend_can_be_disabled() {
        let dot = render(&Trace::default(), &store(), false).unwrap();
        assert!(!dot.contains("cluster_legend"));
        assert!(dot.contains("newrank=true;"));
    }

    #[test]
    fn draws_one_styled_node_per_distinct_entry() {
        let trace = Trace::from_refs([
            TypedRef::pod("ns:p1"),
            TypedRef::pod("ns:p1"),
            TypedRef::role("arn:aws:iam::1:role/r1"),
        ]);
        let dot = render(&trace, &store(), true).unwrap();
        let pod_node = "\"[Kubernetes pod] ns:p1\" [label=\"ns:p1\" style=\"filled\" fillcolor=\"#4260FA\" fontcolor=\"#f0f0f0\" fontname=\"Helvetica\"];";
        assert_eq!(dot.matches(pod_node).count(), 1);
        assert!(dot.contains("\"[IAM role] arn:aws:iam::1:role/r1\" [label=\"arn:aws:iam::1:role/r1\" style=\"filled\" fillcolor=\"#FD8564\""));
    }

    #[test]
    fn draws_correlated_edges_once() {
        let trace = Trace::from_refs([
            TypedRef::pod("ns:p1"),
            TypedRef::service_account("ns:sa1"),
            TypedRef::role("arn:aws:iam::1:role/r1"),
            TypedRef::pod("ns:p1"),
            TypedRef::policy("arn:aws:iam::aws:policy/S3"),
        ]);
        let dot = render(&trace, &store(), true).unwrap();
        assert_eq!(
            edge_lines(&dot),
            vec![
                "\"[Kubernetes pod] ns:p1\" -> \"[Kubernetes service account] ns:sa1\" [label=\"uses\" fontname=\"Helvetica\"];",
                "\"[Kubernetes pod] ns:p1\" -> \"[IAM role] arn:aws:iam::1:role/r1\" [label=\"assumes\" fontname=\"Helvetica\"];",
            ]
        );
    }

    #[test]
    fn dangling_entries_are_drawn_without_edges() {
        let trace = Trace::from_refs([TypedRef::pod("ns:ghost"), TypedRef::service_account("ns:sa1")]);
        let dot = render(&trace, &store(), false).unwrap();
        assert!(dot.contains("\"[Kubernetes pod] ns:ghost\" [label=\"ns:ghost\""));
        assert!(edge_lines(&dot).is_empty());
    }
}
