//! # verishot — Image Provenance Verdict Engine
//!
//! Answers one question about a still image: AI-generated or
//! camera-captured? Verishot fuses byte-level container evidence
//! (JUMBF/C2PA boxes), EXIF device evidence, optional third-party
//! verification results, and filename/dimension heuristics into a single
//! verdict with a confidence score and an auditable weight breakdown.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      VerishotEngine                       │
//! │  ┌───────────┐  ┌────────────┐  ┌─────────────────────┐   │
//! │  │ Container │  │ EXIF Tags  │  │ Verification        │   │
//! │  │ Scanner   │  │ (caller)   │  │ (pre-fetched JSON)  │   │
//! │  └─────┬─────┘  └─────┬──────┘  └──────────┬──────────┘   │
//! │        │              │                    │              │
//! │  ┌─────▼──────────────▼────────────────────▼───────────┐  │
//! │  │   Classifier: ordered rule cascade, first match     │  │
//! │  │  provenance │ ai-tool │ device │ messaging │ default │  │
//! │  └──────────────────────────┬──────────────────────────┘  │
//! │                             │                             │
//! │  ┌──────────────────────────▼──────────────────────────┐  │
//! │  │   Verdict → Fingerprint → AnalysisReport → Render   │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Capabilities
//!
//! - **JPEG APP11 Scanning**: marker-stream walk locating JUMBF superboxes
//! - **PNG Text Chunk Scanning**: iTXt/tEXt/zTXt inspection for C2PA markers
//! - **Deterministic Classification**: five-group evidence cascade, no ML
//! - **Device Evidence Scoring**: make/model, exposure, GPS, lens, date
//! - **Verification Normalization**: tolerant ingestion of external C2PA
//!   validator output
//! - **Vocabulary Injection**: generator/messaging/editor word lists
//!   overridable from `verishot.toml`
//! - **Content Fingerprinting**: SHA-256 + BLAKE3 anchors on every report
//! - **Reports**: JSON and Markdown rendering with weight-bar breakdowns
//!
//! The scanner and classifier are pure functions with no I/O and no
//! clock access. Only the engine's filesystem entry points can fail.

pub mod scan;
pub mod metadata;
pub mod classify;
pub mod engine;
pub mod report;

// Re-exports for convenience
pub use scan::{scan, probe_dimensions, Container, ContainerScanResult, Segment, SegmentKind};
pub use metadata::{Dimensions, ExifTags, ImageMetadata, MetadataBuilder, VerificationResult};
pub use classify::{Classifier, DeviceEvidence, EvidenceWeight, Sign, Verdict, Vocabulary};
pub use engine::{
    AnalysisInput, AnalysisReport, ContentFingerprint, VerishotConfig, VerishotEngine,
};
pub use report::{render_report, write_report, ReportFormat};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerishotError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type VerishotResult<T> = Result<T, VerishotError>;
