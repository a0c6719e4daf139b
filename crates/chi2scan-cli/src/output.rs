use std::io::Write;

use chi2scan_core::{ReportPaths, ScanEvent};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

pub fn print_no_files(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", "No PDF files found!".red())
    } else {
        writeln!(w, "No PDF files found!")
    }
}

/// Print the number of PDFs about to be scanned.
pub fn print_file_count(w: &mut dyn Write, count: usize, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    let msg = format!("Found {} PDF file(s)", count);
    if color.enabled() {
        writeln!(w, "{}", msg.bold())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print a per-file progress event.
///
/// Scanned files print their report line; files with no values show the
/// `NOT_FOUND` marker dimmed when color is on.
pub fn print_scan_event(
    w: &mut dyn Write,
    event: &ScanEvent<'_>,
    color: ColorMode,
) -> std::io::Result<()> {
    match event {
        ScanEvent::Failed { path, error } => {
            if color.enabled() {
                writeln!(w, "{} reading {}: {}", "[ERROR]".red(), path.display(), error)
            } else {
                writeln!(w, "[ERROR] reading {}: {}", path.display(), error)
            }
        }
        ScanEvent::Scanned { entry } => {
            if color.enabled() && entry.values.is_empty() {
                writeln!(w, "{}", entry.histo_line().dimmed())
            } else {
                writeln!(w, "{}", entry.histo_line())
            }
        }
    }
}

/// Print how many files could not be read, if any.
pub fn print_unreadable_count(
    w: &mut dyn Write,
    failed: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    if failed == 0 {
        return Ok(());
    }
    let msg = format!("Could not read {} PDF file(s)", failed);
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())
    } else {
        writeln!(w, "{}", msg)
    }
}

pub fn print_chi2_count(w: &mut dyn Write, per_pdf: usize, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    let msg = format!("Each PDF contains {} chi-squared value(s)", per_pdf);
    if color.enabled() {
        writeln!(w, "{}", msg.bold())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print where the two report files were written.
pub fn print_saved_paths(
    w: &mut dyn Write,
    paths: &ReportPaths,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "Saved name+χ² →".green(), paths.histo.display())?;
        writeln!(w, "{} {}", "Saved χ² only →".green(), paths.values.display())?;
    } else {
        writeln!(w, "Saved name+χ² → {}", paths.histo.display())?;
        writeln!(w, "Saved χ² only → {}", paths.values.display())?;
    }
    writeln!(w)?;
    Ok(())
}
