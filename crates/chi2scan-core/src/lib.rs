pub mod backend;
pub mod config_file;
pub mod inputs;
pub mod pattern;
pub mod report;
pub mod scan;

pub use backend::{BackendError, PdfBackend};
pub use config_file::ConfigFile;
pub use inputs::collect_input_pdfs;
pub use pattern::{extract_chi2_values, extract_from_pdf};
pub use report::{ReportError, ReportPaths, resolve_output_dir, write_report};
pub use scan::{NOT_FOUND, ReportEntry, ScanEvent, ScanSummary, scan_files};
