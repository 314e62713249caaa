//! Generate command handler
//!
//! Renders the built-in process view and writes it to disk, overwriting any
//! previous file.

use isms_view::config::Config;
use isms_view::core::diagram::check_consistency;
use isms_view::core::process_model::OUTPUT_STEM;
use isms_view::core::report::{DocumentContext, DocumentGenerator, ReportFormat};
use logger::{info, verbose, warn};
use std::path::{Path, PathBuf};

/// Generate the document and return the path it was written to.
///
/// # Errors
/// Returns a printable message if the format is unknown or the file cannot be written.
pub fn run(output: Option<&Path>, format_str: &str, config: &Config) -> Result<PathBuf, String> {
    let format: ReportFormat = format_str
        .parse()
        .map_err(|e| format!("{e}. Use: html or markdown"))?;

    let ctx = DocumentContext::iso27001_nfrm();

    let report = check_consistency(&ctx.diagram, ctx.annotations);
    if !report.is_consistent() {
        warn!("Process model is inconsistent: {report}");
    }

    let output_path = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(config, format)?,
    };

    verbose!("Rendering {format} document with {} annotations", ctx.annotations.len());
    format
        .generator()
        .generate(&ctx, &output_path)
        .map_err(|e| format!("Failed to write {}: {e}", output_path.display()))?;

    info!("Document exported to: {}", output_path.display());
    println!(
        "{} file '{}' generated successfully.",
        format_label(format),
        output_path.display()
    );

    Ok(output_path)
}

/// Fixed file name inside the configured output directory
///
/// With the default directory (`.`) the bare file name is used.
fn default_output_path(config: &Config, format: ReportFormat) -> Result<PathBuf, String> {
    let file_name = format!("{OUTPUT_STEM}.{}", format.extension());
    let dir = config.output_dir();

    if dir == Path::new(".") {
        return Ok(PathBuf::from(file_name));
    }

    std::fs::create_dir_all(&dir).map_err(|e| {
        format!("Failed to create output directory {}: {e}", dir.display())
    })?;
    Ok(dir.join(file_name))
}

const fn format_label(format: ReportFormat) -> &'static str {
    match format {
        ReportFormat::Html => "HTML",
        ReportFormat::Markdown => "Markdown",
    }
}
