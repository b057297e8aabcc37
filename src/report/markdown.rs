//! Markdown report renderer
//!
//! Produces a review-ready Markdown document with the verdict up top,
//! file metadata, numbered reasons, and the evidence weight breakdown.

use crate::classify::Sign;
use crate::engine::AnalysisReport;
use crate::VerishotResult;

/// Render an analysis report as Markdown
pub fn render(report: &AnalysisReport) -> VerishotResult<String> {
    let mut md = String::with_capacity(2048);

    // Title and verdict
    md.push_str("# Verishot Provenance Report\n\n");
    let verdict = &report.verdict;
    let call = if verdict.is_ai {
        "AI-generated"
    } else {
        "Camera-captured"
    };
    md.push_str(&format!(
        "## {} {} ({}% confidence)\n\n",
        verdict_badge(verdict.is_ai),
        call,
        verdict.confidence
    ));

    // Metadata
    md.push_str("| Field | Value |\n|---|---|\n");
    md.push_str(&format!(
        "| **File** | `{}` |\n",
        truncate(&report.file_name, 80)
    ));
    md.push_str(&format!("| **Type** | {} |\n", report.file_type));
    md.push_str(&format!("| **Size** | {} bytes |\n", report.file_size));
    md.push_str(&format!("| **Container** | {} |\n", report.container));
    md.push_str(&format!(
        "| **Provenance Marker** | {} |\n",
        if report.provenance_present {
            "present"
        } else {
            "absent"
        }
    ));
    md.push_str(&format!(
        "| **Heuristic Score** | {:+.1} |\n",
        verdict.score
    ));
    if let Some(fingerprint) = &report.fingerprint {
        md.push_str(&format!("| **SHA-256** | `{}` |\n", fingerprint.sha256));
    }
    md.push_str(&format!(
        "| **Analyzed** | {} |\n",
        report.analyzed_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "| **Engine Version** | {} |\n",
        report.engine_version
    ));
    md.push_str("\n");

    // Reasons
    md.push_str("## Reasons\n\n");
    for (i, reason) in verdict.reasons.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, reason));
    }
    md.push_str("\n");

    // Evidence breakdown
    if !verdict.breakdown.is_empty() {
        md.push_str("## Evidence Breakdown\n\n");
        md.push_str("| Evidence | Weight | Leans |\n|---|---|---|\n");
        for entry in &verdict.breakdown {
            md.push_str(&format!(
                "| {} | `{}` {:.2} | {} |\n",
                entry.label,
                weight_bar(entry.weight),
                entry.weight,
                sign_label(entry.sign)
            ));
        }
        md.push_str("\n");
    }

    Ok(md)
}

fn verdict_badge(is_ai: bool) -> &'static str {
    if is_ai {
        "🤖"
    } else {
        "📷"
    }
}

fn sign_label(sign: Sign) -> &'static str {
    match sign {
        Sign::FavorsAi => "AI",
        Sign::FavorsCamera => "Camera",
    }
}

/// Ten-character bar visualizing a 0.0-1.0 weight.
fn weight_bar(weight: f64) -> String {
    let filled = (weight.clamp(0.0, 1.0) * 10.0).round() as usize;
    let mut bar = String::with_capacity(10);
    for i in 0..10 {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

/// Truncate a string, appending an ellipsis when shortened.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push('…');
        out
    }
}
