//! Analysis engine — orchestrates scan, classify, fingerprint, report
//!
//! The engine owns a compiled classifier and stitches the pure pieces
//! together for one image at a time: scan the container, merge
//! caller-supplied metadata, classify, fingerprint, and stamp the
//! result into an [`AnalysisReport`]. Filesystem entry points wrap the
//! same path for single files and directory sweeps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::classify::{Classifier, Verdict, Vocabulary};
use crate::metadata::{Dimensions, ExifTags, ImageMetadata, VerificationResult};
use crate::scan::{self, Container};
use crate::{VerishotError, VerishotResult};

const CONFIG_FILE: &str = "verishot.toml";

fn default_true() -> bool {
    true
}

/// Engine configuration, loadable from `verishot.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerishotConfig {
    #[serde(default)]
    pub vocabulary: Vocabulary,
    /// Read pixel dimensions from container headers when the caller
    /// supplied none.
    #[serde(default = "default_true")]
    pub probe_dimensions: bool,
    /// Attach SHA-256/BLAKE3 fingerprints to each report.
    #[serde(default = "default_true")]
    pub fingerprint: bool,
}

impl Default for VerishotConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            probe_dimensions: true,
            fingerprint: true,
        }
    }
}

impl VerishotConfig {
    pub fn from_file(path: &Path) -> VerishotResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: VerishotConfig = toml::from_str(&content)
            .map_err(|e| VerishotError::Config(format!("failed to parse config: {}", e)))?;
        config.vocabulary.fill_defaults();
        Ok(config)
    }

    /// Load `verishot.toml` from the working directory, falling back to
    /// defaults when the file is missing or malformed.
    pub fn from_project_root() -> Self {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!("failed to load {}: {}; using defaults", path.display(), e);
                }
            }
        }
        Self::default()
    }
}

/// One image to analyze: raw bytes plus whatever metadata the caller's
/// extractor already produced.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput<'a> {
    pub bytes: &'a [u8],
    pub file_name: String,
    pub file_type: String,
    pub exif: ExifTags,
    pub dimensions: Option<Dimensions>,
    pub verification: Option<VerificationResult>,
}

/// Content hashes anchoring a report to exact input bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFingerprint {
    pub sha256: String,
    pub blake3: String,
}

impl ContentFingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        Self {
            sha256: hex::encode(Sha256::digest(bytes)),
            blake3: blake3::hash(bytes).to_hex().to_string(),
        }
    }
}

/// Full analysis record for one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub container: Container,
    pub provenance_present: bool,
    pub verdict: Verdict,
    pub fingerprint: Option<ContentFingerprint>,
    pub analyzed_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub engine_version: String,
}

pub struct VerishotEngine {
    config: VerishotConfig,
    classifier: Classifier,
}

impl VerishotEngine {
    pub fn new(config: VerishotConfig) -> VerishotResult<Self> {
        let classifier = Classifier::new(&config.vocabulary)?;
        Ok(Self { config, classifier })
    }

    /// Analyze one image already in memory.
    pub fn analyze(&self, input: AnalysisInput<'_>) -> AnalysisReport {
        let start = Instant::now();

        let container_scan = scan::scan(input.bytes);
        tracing::debug!(
            "container scan: {} ({} segments, provenance {})",
            container_scan.container,
            container_scan.segments.len(),
            container_scan.present
        );

        let dimensions = input.dimensions.or_else(|| {
            if self.config.probe_dimensions {
                scan::probe_dimensions(input.bytes)
            } else {
                None
            }
        });

        let container = container_scan.container;
        let provenance_present = container_scan.present;

        let meta = ImageMetadata::builder()
            .exif(input.exif)
            .file_type(input.file_type)
            .file_size(input.bytes.len() as u64)
            .file_name(input.file_name)
            .dimensions(dimensions)
            .container_scan(container_scan)
            .verification(input.verification)
            .build();

        let verdict = self.classifier.classify(&meta);

        let fingerprint = if self.config.fingerprint {
            Some(ContentFingerprint::of(input.bytes))
        } else {
            None
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "{}: {} ({} reasons, {}ms)",
            meta.file_name,
            verdict,
            verdict.reasons.len(),
            duration_ms
        );

        AnalysisReport {
            id: Uuid::new_v4(),
            file_name: meta.file_name,
            file_type: meta.file_type,
            file_size: meta.file_size,
            container,
            provenance_present,
            verdict,
            fingerprint,
            analyzed_at: Utc::now(),
            duration_ms,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Read and analyze one image file. EXIF extraction is out of scope
    /// here; reports from this path carry container and filename
    /// evidence only.
    pub fn analyze_file(&self, path: &Path) -> VerishotResult<AnalysisReport> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let file_type = mime_from_extension(path);
        Ok(self.analyze(AnalysisInput {
            bytes: &bytes,
            file_name,
            file_type,
            exif: ExifTags::new(),
            dimensions: None,
            verification: None,
        }))
    }

    /// Analyze every JPEG and PNG under a directory tree. Unreadable
    /// files are logged and skipped rather than aborting the sweep.
    pub fn analyze_dir(&self, root: &Path) -> VerishotResult<Vec<AnalysisReport>> {
        if !root.exists() {
            return Err(VerishotError::Analysis(format!(
                "no such directory: {}",
                root.display()
            )));
        }
        let mut reports = Vec::new();
        for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| matches!(e.to_lowercase().as_str(), "jpg" | "jpeg" | "png"))
                .unwrap_or(false);
            if !is_image {
                continue;
            }
            match self.analyze_file(path) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
        Ok(reports)
    }
}

fn mime_from_extension(path: &Path) -> String {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("png") => "image/png".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("b.JPEG")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("c.png")), "image/png");
        assert_eq!(
            mime_from_extension(Path::new("d.webp")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_from_extension(Path::new("noext")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_fingerprint_known_sha256() {
        let fp = ContentFingerprint::of(b"abc");
        assert_eq!(
            fp.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(fp.blake3.len(), 64);
    }

    #[test]
    fn test_fingerprint_differs_across_inputs() {
        let a = ContentFingerprint::of(b"one");
        let b = ContentFingerprint::of(b"two");
        assert_ne!(a.sha256, b.sha256);
        assert_ne!(a.blake3, b.blake3);
    }

    #[test]
    fn test_config_defaults() {
        let config = VerishotConfig::default();
        assert!(config.probe_dimensions);
        assert!(config.fingerprint);
        assert!(!config.vocabulary.ai_tools.is_empty());
    }

    #[test]
    fn test_config_from_file_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fingerprint = false").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[vocabulary]").unwrap();
        writeln!(file, "ai_tools = [\"paintomatic\"]").unwrap();
        let config = VerishotConfig::from_file(file.path()).unwrap();
        assert!(!config.fingerprint);
        assert!(config.probe_dimensions);
        assert_eq!(config.vocabulary.ai_tools, vec!["paintomatic".to_string()]);
        // Lists omitted from the file keep their defaults
        assert_eq!(config.vocabulary.messaging_apps.len(), 8);
    }
}
