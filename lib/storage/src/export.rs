// Report export - pretty JSON document, written atomically
use atomicwrites::{AllowOverwrite, AtomicFile};
use catgraph_core::{Error, Report, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_REPORT_FILE: &str = "graph_report.json";

/// Writes analysis reports to a fixed artifact path.
///
/// Every write replaces the previous artifact as a whole: the document goes
/// to a temporary file next to the target and is renamed over it, so a
/// failed write leaves the old artifact (or none) in place.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    path: PathBuf,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_FILE)
    }
}

impl ReportExporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        // atomic writes need a real directory for the temporary file
        let path = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => path.to_path_buf(),
            _ => Path::new(".").join(path),
        };
        Self { path }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the report with a two-space indent and stable field order.
    pub fn to_document(report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Write the report and return the artifact location.
    pub fn write(&self, report: &Report) -> Result<PathBuf> {
        let document = Self::to_document(report)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        AtomicFile::new(&self.path, AllowOverwrite)
            .write(|file| file.write_all(document.as_bytes()))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::Io(e),
            })?;

        debug!(path = ?self.path, bytes = document.len(), "graph report written");
        Ok(self.path.clone())
    }
}
