use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::scan::ScanSummary;

pub const HISTO_FILE_NAME: &str = "chi2_histo_values.txt";
pub const VALUES_FILE_NAME: &str = "chi2_values.txt";

/// Appended to the derived output directory name.
pub const OUTPUT_DIR_SUFFIX: &str = "_output";
/// Base name used when the input was a glob pattern.
pub const FALLBACK_LABEL: &str = "pdf_collection";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create output directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Locations of the two files written by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub histo: PathBuf,
    pub values: PathBuf,
}

/// Pick the output directory for a run.
///
/// An explicit directory always wins. Otherwise the name is derived from
/// the input: the file stem for a single file, the directory's own name for
/// a directory, and [`FALLBACK_LABEL`] for a pattern, each followed by
/// [`OUTPUT_DIR_SUFFIX`].
pub fn resolve_output_dir(explicit: Option<&Path>, input: &str) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    let path = Path::new(input);
    let base = if path.is_file() {
        path.file_stem().map(|s| s.to_string_lossy().to_string())
    } else if path.is_dir() {
        Some(dir_base_name(path))
    } else {
        None
    };

    let base = base.unwrap_or_else(|| FALLBACK_LABEL.to_string());
    PathBuf::from(format!("{base}{OUTPUT_DIR_SUFFIX}"))
}

/// Last component of `dir` after lexical normalization.
///
/// `.` components are dropped and `x/..` cancels out without touching the
/// filesystem, so the name depends only on the input text: `.` stays `.`,
/// `plots/sub/..` gives `plots`, and the root gives an empty name.
fn dir_base_name(dir: &Path) -> String {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in dir.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    match parts.last() {
        None => ".".to_string(),
        Some(Component::Normal(name)) => name.to_string_lossy().to_string(),
        Some(Component::ParentDir) => "..".to_string(),
        Some(Component::RootDir) | Some(Component::Prefix(_)) | Some(Component::CurDir) => {
            String::new()
        }
    }
}

/// Body of the name + values report.
pub fn render_histo(summary: &ScanSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} PDF file(s)", summary.file_count());
    let _ = writeln!(
        out,
        "Found {} chi-squared values per plot",
        summary.chi2_per_pdf()
    );
    for entry in &summary.entries {
        let _ = writeln!(out, "{}", entry.histo_line());
    }
    out
}

/// Body of the values-only table. Line `i + 2` belongs to file `i`.
pub fn render_values(summary: &ScanSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary.file_count());
    let _ = writeln!(out, "{}", summary.chi2_per_pdf());
    for entry in &summary.entries {
        let _ = writeln!(out, "{}", entry.values_line());
    }
    out
}

/// Create `out_dir` if needed and write both report files into it.
pub fn write_report(out_dir: &Path, summary: &ScanSummary) -> Result<ReportPaths, ReportError> {
    std::fs::create_dir_all(out_dir).map_err(|source| ReportError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let paths = ReportPaths {
        histo: out_dir.join(HISTO_FILE_NAME),
        values: out_dir.join(VALUES_FILE_NAME),
    };

    write_file(&paths.histo, &render_histo(summary))?;
    write_file(&paths.values, &render_values(summary))?;

    tracing::debug!(dir = %out_dir.display(), files = summary.file_count(), "wrote report");
    Ok(paths)
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
