use indexmap::IndexSet;
use tracing::warn;

use crate::errors::ReferenceResult;
use crate::reference::{Kind, TypedRef};

/// Ordered, possibly repeating sequence of references visited by a traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<TypedRef>,
}

impl Trace {
    pub fn from_refs(entries: impl IntoIterator<Item = TypedRef>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parses one `"[kind] key"` reference per line.
    ///
    /// Blank lines are ignored and lines naming an unknown kind are skipped.
    /// A line without `]` fails the whole parse.
    pub fn parse(text: &str) -> ReferenceResult<Self> {
        let mut entries = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<TypedRef>() {
                Ok(reference) => entries.push(reference),
                Err(e) if e.is_unknown_kind() => warn!("Skipping trace entry: {}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypedRef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with duplicates removed, in first-seen order.
    pub fn distinct(&self) -> IndexSet<&TypedRef> {
        self.entries.iter().collect()
    }

    /// Distinct entries of one kind, in first-seen order.
    pub fn distinct_of(&self, kind: Kind) -> Vec<&TypedRef> {
        self.distinct()
            .into_iter()
            .filter(|r| r.kind == kind)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TypedRef;
    type IntoIter = std::slice::Iter<'a, TypedRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<TypedRef> for Trace {
    fn from_iter<I: IntoIterator<Item = TypedRef>>(iter: I) -> Self {
        Self::from_refs(iter)
    }
}
