use std::path::{Path, PathBuf};

use crate::backend::{BackendError, PdfBackend};
use crate::pattern::extract_from_pdf;

/// Marker written in place of the values when a PDF yielded none.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Values found in one PDF, keyed by its base file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub file_name: String,
    pub values: Vec<String>,
}

impl ReportEntry {
    pub fn new(path: &Path, values: Vec<String>) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self { file_name, values }
    }

    /// Space-joined values, or an empty string when none were found.
    pub fn values_line(&self) -> String {
        self.values.join(" ")
    }

    /// `<name>   <values>` or `<name>   NOT_FOUND`.
    pub fn histo_line(&self) -> String {
        if self.values.is_empty() {
            format!("{}   {}", self.file_name, NOT_FOUND)
        } else {
            format!("{}   {}", self.file_name, self.values_line())
        }
    }
}

/// Progress notifications emitted while scanning, in file order.
#[derive(Debug)]
pub enum ScanEvent<'a> {
    /// Text extraction failed; the file is recorded with no values.
    Failed {
        path: &'a Path,
        error: &'a BackendError,
    },
    /// A file has been fully processed.
    Scanned { entry: &'a ReportEntry },
}

/// Outcome of scanning a batch of PDFs.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub entries: Vec<ReportEntry>,
    pub failed: Vec<PathBuf>,
}

impl ScanSummary {
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of chi-squared values per plot, taken from the first file
    /// that had any. Zero when no file had values.
    pub fn chi2_per_pdf(&self) -> usize {
        self.entries
            .iter()
            .find(|e| !e.values.is_empty())
            .map(|e| e.values.len())
            .unwrap_or(0)
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Files with values whose count differs from [`chi2_per_pdf`](Self::chi2_per_pdf).
    pub fn inconsistent_entries(&self) -> Vec<&ReportEntry> {
        let expected = self.chi2_per_pdf();
        self.entries
            .iter()
            .filter(|e| !e.values.is_empty() && e.values.len() != expected)
            .collect()
    }
}

/// Scan `files` one after another, calling `on_event` as each completes.
///
/// A file whose text cannot be extracted is reported through
/// [`ScanEvent::Failed`] and then recorded with no values; it never stops
/// the batch.
pub fn scan_files<F>(
    files: &[PathBuf],
    backend: &dyn PdfBackend,
    mut on_event: F,
) -> ScanSummary
where
    F: FnMut(ScanEvent<'_>),
{
    let mut summary = ScanSummary::default();

    for path in files {
        let values = match extract_from_pdf(path, backend) {
            Ok(values) => {
                tracing::debug!(path = %path.display(), found = values.len(), "scanned PDF");
                values
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "text extraction failed");
                on_event(ScanEvent::Failed {
                    path,
                    error: &error,
                });
                summary.failed.push(path.clone());
                Vec::new()
            }
        };

        let entry = ReportEntry::new(path, values);
        on_event(ScanEvent::Scanned { entry: &entry });
        summary.entries.push(entry);
    }

    let expected = summary.chi2_per_pdf();
    for entry in summary.inconsistent_entries() {
        tracing::warn!(
            file = %entry.file_name,
            found = entry.values.len(),
            expected,
            "chi-squared value count differs from the first file with values"
        );
    }

    summary
}
