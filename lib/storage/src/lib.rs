pub mod catalog;
pub mod export;
pub mod manager;

pub use catalog::CatalogStore;
pub use export::{ReportExporter, DEFAULT_REPORT_FILE};
pub use manager::{analyze_snapshot, AnalyzeError, StorageManager};
