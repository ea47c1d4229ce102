use crate::catalog::CatalogStore;
use crate::export::{ReportExporter, DEFAULT_REPORT_FILE};
use catgraph_core::{AnalysisConfig, Analyzer, CatalogSnapshot, Report};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Failure of an analysis run.
///
/// An export failure still carries the fully assembled report, so callers
/// can serve it without the file artifact.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("Graph analysis failed: {0}")]
    Compute(#[from] catgraph_core::Error),

    #[error("Failed to export graph report to {path:?}: {source}")]
    Export {
        path: PathBuf,
        report: Box<Report>,
        #[source]
        source: catgraph_core::Error,
    },
}

impl AnalyzeError {
    /// The report computed before the export failed, if any.
    pub fn report(&self) -> Option<&Report> {
        match self {
            AnalyzeError::Compute(_) => None,
            AnalyzeError::Export { report, .. } => Some(&**report),
        }
    }

    pub fn into_report(self) -> Option<Report> {
        match self {
            AnalyzeError::Compute(_) => None,
            AnalyzeError::Export { report, .. } => Some(*report),
        }
    }
}

/// Analyze one snapshot and write the report artifact.
///
/// Nothing is written unless the report was fully assembled.
pub fn analyze_snapshot(
    snapshot: &CatalogSnapshot,
    analyzer: &Analyzer,
    exporter: &ReportExporter,
) -> Result<(PathBuf, Report), AnalyzeError> {
    let report = analyzer.run(snapshot)?;

    match exporter.write(&report) {
        Ok(path) => {
            info!("Graph analysis saved to: {:?}", path);
            Ok((path, report))
        }
        Err(source) => {
            warn!("Graph report export failed: {}", source);
            Err(AnalyzeError::Export {
                path: exporter.path().to_path_buf(),
                report: Box::new(report),
                source,
            })
        }
    }
}

/// Owns the catalog and runs analyses over it
pub struct StorageManager {
    catalog: Arc<CatalogStore>,
    analyzer: Analyzer,
    exporter: ReportExporter,
}

impl StorageManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> catgraph_core::Result<Self> {
        Self::with_config(data_dir, AnalysisConfig::default())
    }

    /// Catalog file and report artifact both live in `data_dir`.
    pub fn with_config<P: AsRef<Path>>(
        data_dir: P,
        config: AnalysisConfig,
    ) -> catgraph_core::Result<Self> {
        let data_dir = data_dir.as_ref();
        let catalog = Arc::new(CatalogStore::open(data_dir)?);
        let exporter = ReportExporter::new(data_dir.join(DEFAULT_REPORT_FILE));

        Ok(Self {
            catalog,
            analyzer: Analyzer::new(config),
            exporter,
        })
    }

    /// Manager over an existing catalog, e.g. an in-memory one.
    pub fn from_parts(catalog: Arc<CatalogStore>, analyzer: Analyzer, exporter: ReportExporter) -> Self {
        Self {
            catalog,
            analyzer,
            exporter,
        }
    }

    #[must_use]
    pub fn with_report_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.exporter = ReportExporter::new(path);
        self
    }

    #[inline]
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    #[inline]
    pub fn exporter(&self) -> &ReportExporter {
        &self.exporter
    }

    /// Snapshot the catalog, analyze it and export the report.
    pub fn analyze(&self) -> Result<(PathBuf, Report), AnalyzeError> {
        let snapshot = self.catalog.snapshot();
        analyze_snapshot(&snapshot, &self.analyzer, &self.exporter)
    }
}
