use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub dump_prefix: String,
    pub trace_prefix: String,
    /// Pretty-print raw records instead of one JSON object per line
    pub pretty_records: bool,
    pub legend: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            dump_prefix: "rbiam-dump".to_string(),
            trace_prefix: "rbiam-trace".to_string(),
            pretty_records: false,
            legend: true,
        }
    }
}

impl ExportConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
