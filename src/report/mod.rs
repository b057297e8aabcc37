//! Report rendering — JSON and Markdown output
//!
//! Transforms an `AnalysisReport` into machine-readable or
//! human-readable form. Rendering never re-runs analysis; both formats
//! present the same record.

pub mod json;
pub mod markdown;

use crate::engine::AnalysisReport;
use crate::VerishotResult;
use std::path::Path;

/// Output format for an analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Structured JSON (machine-readable)
    Json,
    /// Human-readable Markdown with verdict badge and evidence tables
    Markdown,
}

/// Write a report in the specified format
pub fn write_report(
    report: &AnalysisReport,
    format: ReportFormat,
    output: &Path,
) -> VerishotResult<()> {
    let content = render_report(report, format)?;
    std::fs::write(output, content).map_err(crate::VerishotError::Io)?;
    Ok(())
}

/// Render a report to a string
pub fn render_report(report: &AnalysisReport, format: ReportFormat) -> VerishotResult<String> {
    match format {
        ReportFormat::Json => json::render(report),
        ReportFormat::Markdown => markdown::render(report),
    }
}
