//! End-to-end engine tests: file analysis, directory sweeps, rendering

use std::fs;
use std::path::Path;

use verishot::engine::{AnalysisInput, VerishotConfig, VerishotEngine};
use verishot::metadata::ExifTags;
use verishot::report::{render_report, write_report, ReportFormat};
use verishot::scan::Container;
use verishot::VerishotError;

// ─── Fixture builders ───────────────────────────────────────────────────────

fn png_chunk(type_code: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&(data.len() as u32).to_be_bytes());
    bytes.extend_from_slice(type_code);
    bytes.extend_from_slice(data);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

fn png_bytes(width: u32, height: u32, chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes.extend_from_slice(&png_chunk(b"IHDR", &ihdr));
    for c in chunks {
        bytes.extend_from_slice(c);
    }
    bytes.extend_from_slice(&png_chunk(b"IEND", &[]));
    bytes
}

fn jumbf_jpeg() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xEB, 0x00, 0x09];
    bytes.extend_from_slice(b"JUMBF\xFF\xD9");
    bytes
}

fn engine() -> VerishotEngine {
    VerishotEngine::new(VerishotConfig::default()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// File and directory analysis
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_analyze_file_marked_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.png");
    fs::write(
        &path,
        png_bytes(1024, 1024, &[png_chunk(b"iTXt", b"c2pa manifest-ref")]),
    )
    .unwrap();

    let report = engine().analyze_file(&path).unwrap();

    assert_eq!(report.file_name, "generated.png");
    assert_eq!(report.file_type, "image/png");
    assert_eq!(report.container, Container::Png);
    assert!(report.provenance_present);
    assert!(report.verdict.is_ai, "square PNG without EXIF defaults to AI");
    assert!(report.fingerprint.is_some());
    assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_probed_dimensions_reach_the_classifier() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("download.png");
    fs::write(&path, png_bytes(1600, 900, &[])).unwrap();

    let report = engine().analyze_file(&path).unwrap();

    assert!(
        !report.verdict.is_ai,
        "probed 16:9 geometry triggers the messaging re-encode rule"
    );
    assert_eq!(report.verdict.confidence, 55);
}

#[test]
fn test_analyze_dir_sweeps_images_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.png"), png_bytes(64, 64, &[])).unwrap();
    fs::write(dir.path().join("b.jpg"), [0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
    fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

    let reports = engine().analyze_dir(dir.path()).unwrap();

    assert_eq!(reports.len(), 2);
    let mut names: Vec<&str> = reports.iter().map(|r| r.file_name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["a.png", "b.jpg"]);
}

#[test]
fn test_analyze_dir_missing_root_is_an_error() {
    let err = engine()
        .analyze_dir(Path::new("/nonexistent/verishot-test-dir"))
        .unwrap_err();
    assert!(matches!(err, VerishotError::Analysis(_)));
}

#[test]
fn test_in_memory_analysis_with_caller_exif() {
    let mut exif = ExifTags::new();
    exif.insert("Make", serde_json::json!("Canon"));
    exif.insert("Model", serde_json::json!("EOS R5"));
    exif.insert("FNumber", serde_json::json!(1.8));

    let bytes = jumbf_jpeg();
    let report = engine().analyze(AnalysisInput {
        bytes: &bytes,
        file_name: "signed.jpg".to_string(),
        file_type: "image/jpeg".to_string(),
        exif,
        dimensions: None,
        verification: None,
    });

    assert_eq!(report.container, Container::Jpeg);
    assert!(report.provenance_present);
    assert!(!report.verdict.is_ai, "camera EXIF decides despite provenance");
    assert!(report.verdict.reasons[0].starts_with("C2PA provenance"));
    assert!(report.verdict.reasons[1].starts_with("Camera metadata found"));
}

#[test]
fn test_fingerprint_can_be_disabled() {
    let config = VerishotConfig {
        fingerprint: false,
        ..VerishotConfig::default()
    };
    let engine = VerishotEngine::new(config).unwrap();
    let report = engine.analyze(AnalysisInput {
        bytes: &[0xFF, 0xD8, 0xFF, 0xD9],
        file_name: "plain.jpg".to_string(),
        file_type: "image/jpeg".to_string(),
        ..AnalysisInput::default()
    });
    assert!(report.fingerprint.is_none());
}

#[test]
fn test_report_ids_are_unique() {
    let engine = engine();
    let first = engine.analyze(AnalysisInput::default());
    let second = engine.analyze(AnalysisInput::default());
    assert_ne!(first.id, second.id);
}

// ═══════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_json_rendering_exposes_verdict_fields() {
    let bytes = jumbf_jpeg();
    let report = engine().analyze(AnalysisInput {
        bytes: &bytes,
        file_name: "generated.jpg".to_string(),
        file_type: "image/jpeg".to_string(),
        ..AnalysisInput::default()
    });

    let json = render_report(&report, ReportFormat::Json).unwrap();
    assert!(json.contains("\"is_ai\""));
    assert!(json.contains("\"provenance_present\": true"));
    assert!(json.contains("\"sha256\""));

    // Round-trips through serde
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["container"], "jpeg");
}

#[test]
fn test_markdown_rendering_sections() {
    let report = engine().analyze(AnalysisInput {
        bytes: &[0xFF, 0xD8, 0xFF, 0xD9],
        file_name: "plain.jpg".to_string(),
        file_type: "image/jpeg".to_string(),
        ..AnalysisInput::default()
    });

    let md = render_report(&report, ReportFormat::Markdown).unwrap();
    assert!(md.starts_with("# Verishot Provenance Report"));
    assert!(md.contains("## Reasons"));
    assert!(md.contains("## Evidence Breakdown"));
    assert!(md.contains("| **Provenance Marker** | absent |"));
}

#[test]
fn test_write_report_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.md");
    let report = engine().analyze(AnalysisInput::default());

    write_report(&report, ReportFormat::Markdown, &out).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("# Verishot Provenance Report"));
}
