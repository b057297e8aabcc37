//! JSON report renderer

use crate::engine::AnalysisReport;
use crate::VerishotResult;

/// Render an analysis report as pretty-printed JSON
pub fn render(report: &AnalysisReport) -> VerishotResult<String> {
    serde_json::to_string_pretty(report).map_err(crate::VerishotError::SerdeError)
}
