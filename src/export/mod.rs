pub mod style;
pub mod to_dot;
pub mod to_raw;

use serde::{Deserialize, Serialize};

/// Artifact formats the exporters produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFileType {
    Raw,
    Dot,
}

impl ExportFileType {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFileType::Raw => "json",
            ExportFileType::Dot => "dot",
        }
    }
}
