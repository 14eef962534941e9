use serde::Serialize;

use crate::reference::Kind;

pub const FONT: &str = "Helvetica";

/// Fixed visual style of one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    pub fillcolor: &'static str,
    pub fontcolor: &'static str,
    pub fontname: &'static str,
}

pub fn style_for(kind: Kind) -> NodeStyle {
    let (fillcolor, fontcolor) = match kind {
        Kind::Pod => ("#4260FA", "#f0f0f0"),
        Kind::ServiceAccount => ("#1BFF9F", "#000000"),
        Kind::Secret => ("#F9ED49", "#000000"),
        Kind::Role => ("#FD8564", "#000000"),
        Kind::Policy => ("#D9A7F1", "#000000"),
    };
    NodeStyle {
        fillcolor,
        fontcolor,
        fontname: FONT,
    }
}
