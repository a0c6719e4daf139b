use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chi2scan_core::{
    ConfigFile, PdfBackend, collect_input_pdfs, resolve_output_dir, scan_files, write_report,
};
use chi2scan_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

/// Extract reduced chi-squared (χ²/n) values from PDF plots
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input PDF file, directory, or wildcard pattern
    #[arg(long)]
    input: String,

    /// Output directory name. If not given, derived from the input
    #[arg(long)]
    output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = chi2scan_core::config_file::load_config();

    let stdout = std::io::stdout();
    let color = color_mode(
        cli.no_color,
        std::env::var_os("NO_COLOR").is_some(),
        &config,
        stdout.is_terminal(),
    );
    let mut writer = stdout.lock();

    run(&cli, &MupdfBackend::new(), &mut writer, color)
}

/// CLI flag > `NO_COLOR` env var > config file; never colored when piped.
fn color_mode(
    no_color: bool,
    no_color_env: bool,
    config: &ConfigFile,
    is_terminal: bool,
) -> ColorMode {
    ColorMode(!no_color && !no_color_env && config.color() && is_terminal)
}

fn run(
    cli: &Cli,
    backend: &dyn PdfBackend,
    writer: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let pdfs = collect_input_pdfs(&cli.input);
    if pdfs.is_empty() {
        output::print_no_files(writer, color)?;
        return Ok(());
    }
    output::print_file_count(writer, pdfs.len(), color)?;

    let mut print_result: std::io::Result<()> = Ok(());
    let summary = scan_files(&pdfs, backend, |event| {
        if print_result.is_ok() {
            print_result =
                output::print_scan_event(writer, &event, color).and_then(|()| writer.flush());
        }
    });
    print_result?;

    output::print_unreadable_count(writer, summary.failed_count(), color)?;
    output::print_chi2_count(writer, summary.chi2_per_pdf(), color)?;

    let out_dir = resolve_output_dir(cli.output.as_deref(), &cli.input);
    let paths = write_report(&out_dir, &summary)
        .with_context(|| format!("writing report to {}", out_dir.display()))?;

    output::print_saved_paths(writer, &paths, color)?;
    Ok(())
}
