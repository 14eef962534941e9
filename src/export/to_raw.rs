use tracing::debug;

use crate::errors::{ExportError, ExportResult};
use crate::graph::AccessGraph;
use crate::trace::Trace;

/// Renders the stored record of every resolvable trace entry, one JSON
/// document per line, in trace order. Repeated entries are repeated.
pub fn render(trace: &Trace, store: &AccessGraph, pretty: bool) -> ExportResult<String> {
    let mut dump = String::new();
    for reference in trace {
        let Some(record) = store.record(reference) else {
            debug!("Skipping dangling reference {}", reference);
            continue;
        };
        let serialized = match pretty {
            true => serde_json::to_string_pretty(&record),
            false => serde_json::to_string(&record),
        };
        let serialized = serialized.map_err(|source| ExportError::Serialization {
            reference: reference.to_string(),
            source,
        })?;
        dump.push_str(&serialized);
        dump.push('\n');
    }
    Ok(dump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Pod, Role};
    use crate::reference::TypedRef;
    use serde_json::Value;

    fn store() -> AccessGraph {
        let mut ag = AccessGraph::new();
        ag.insert_pod(Pod::new("ns", "a").with_service_account("sa"));
        ag.insert_role(Role::new("arn:b", "b"));
        ag
    }

    #[test]
    fn keeps_trace_order_and_duplicates() {
        let trace = Trace::from_refs([
            TypedRef::pod("ns:a"),
            TypedRef::role("arn:b"),
            TypedRef::pod("ns:a"),
        ]);
        let dump = render(&trace, &store(), false).unwrap();
        let records: Vec<Value> = dump
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["name"], "a");
        assert_eq!(records[1]["arn"], "arn:b");
        assert_eq!(records[2]["name"], "a");
    }

    #[test]
    fn skips_dangling_references() {
        let trace = Trace::from_refs([TypedRef::pod("ns:ghost"), TypedRef::role("arn:b")]);
        let dump = render(&trace, &store(), false).unwrap();
        assert_eq!(dump.lines().count(), 1);
    }

    #[test]
    fn empty_trace_renders_nothing() {
        assert_eq!(render(&Trace::default(), &store(), false).unwrap(), "");
    }

    #[test]
    fn pretty_records_parse_back() {
        let trace = Trace::from_refs([TypedRef::role("arn:b")]);
        let dump = render(&trace, &store(), true).unwrap();
        assert!(dump.lines().count() > 1);
        let record: Value = serde_json::from_str(&dump).unwrap();
        assert_eq!(record["name"], "b");
    }
}
