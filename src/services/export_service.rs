use std::path::PathBuf;
use tracing::info;

use crate::common::{artifact_name, write_string_to_file};
use crate::config::ExportConfig;
use crate::errors::{ExportError, ExportResult, StoreResult};
use crate::export::{to_dot, to_raw, ExportFileType};
use crate::graph::AccessGraph;
use crate::trace::Trace;

/// Names and writes artifacts rendered from a borrowed store.
///
/// Rendering completes in memory before anything touches disk, so a failed
/// export leaves no partial file.
pub struct ExportService<'a> {
    store: &'a AccessGraph,
    config: ExportConfig,
}

impl<'a> ExportService<'a> {
    pub fn new(store: &'a AccessGraph, config: ExportConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn export_to_string(&self, trace: &Trace, format: ExportFileType) -> ExportResult<String> {
        match format {
            ExportFileType::Raw => to_raw::render(trace, self.store, self.config.pretty_records),
            ExportFileType::Dot => to_dot::render(trace, self.store, self.config.legend),
        }
    }

    pub fn export(&self, trace: &Trace, format: ExportFileType) -> ExportResult<PathBuf> {
        self.export_at(trace, format, chrono::Utc::now().timestamp())
    }

    pub fn export_at(
        &self,
        trace: &Trace,
        format: ExportFileType,
        timestamp: i64,
    ) -> ExportResult<PathBuf> {
        let content = self.export_to_string(trace, format)?;
        let path = self.config.output_dir.join(artifact_name(
            &self.config.trace_prefix,
            timestamp,
            format.extension(),
        ));
        write_string_to_file(&path, &content).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Exported {} trace entries to {}", trace.len(), path.display());
        Ok(path)
    }

    /// Writes `rbiam-trace-<timestamp>.json`.
    pub fn export_raw(&self, trace: &Trace) -> ExportResult<PathBuf> {
        self.export(trace, ExportFileType::Raw)
    }

    /// Writes `rbiam-trace-<timestamp>.dot`.
    pub fn export_graph(&self, trace: &Trace) -> ExportResult<PathBuf> {
        self.export(trace, ExportFileType::Dot)
    }

    /// Writes the whole store to `rbiam-dump-<timestamp>.json`.
    pub fn dump(&self) -> StoreResult<PathBuf> {
        self.store
            .dump(&self.config.output_dir, &self.config.dump_prefix)
    }
}
