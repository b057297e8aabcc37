//! Image metadata model — EXIF tags, dimensions, and the analysis input record
//!
//! EXIF extraction itself is the caller's concern; tags arrive as an
//! open-ended JSON map so any extractor can feed the classifier. A tag
//! whose value is JSON `null` is treated as absent everywhere.

pub mod verification;

pub use verification::VerificationResult;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::scan::ContainerScanResult;

/// Open-ended EXIF tag map keyed by tag name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExifTags(BTreeMap<String, Value>);

impl ExifTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// True when the tag exists with a non-null value.
    pub fn has(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(v) if !v.is_null())
    }

    pub fn any_present(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.has(k))
    }

    /// Tag value rendered as text. Strings pass through unquoted; other
    /// non-null values use their JSON rendering.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Pixel dimensions as reported by the container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn longer_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Longer side over shorter side. Zero when the shorter side is zero.
    pub fn aspect_ratio(&self) -> f64 {
        let shorter = self.width.min(self.height);
        if shorter == 0 {
            return 0.0;
        }
        self.longer_side() as f64 / shorter as f64
    }
}

/// Everything the classifier knows about one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub exif: ExifTags,
    pub file_type: String,
    pub file_size: u64,
    pub file_name: String,
    pub dimensions: Option<Dimensions>,
    pub container_scan: ContainerScanResult,
    pub verification: Option<VerificationResult>,
}

impl ImageMetadata {
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    /// Software tag, trimmed and lowercased, for vocabulary matching.
    /// Empty string when the tag is missing.
    pub fn software_normalized(&self) -> String {
        self.exif
            .text("Software")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default()
    }

    pub fn file_name_normalized(&self) -> String {
        self.file_name.to_lowercase()
    }
}

#[derive(Debug, Default)]
pub struct MetadataBuilder {
    exif: ExifTags,
    file_type: String,
    file_size: u64,
    file_name: String,
    dimensions: Option<Dimensions>,
    container_scan: Option<ContainerScanResult>,
    verification: Option<VerificationResult>,
}

impl MetadataBuilder {
    pub fn exif(mut self, exif: ExifTags) -> Self {
        self.exif = exif;
        self
    }

    pub fn file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    pub fn file_size(mut self, file_size: u64) -> Self {
        self.file_size = file_size;
        self
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn dimensions(mut self, dimensions: Option<Dimensions>) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn container_scan(mut self, container_scan: ContainerScanResult) -> Self {
        self.container_scan = Some(container_scan);
        self
    }

    pub fn verification(mut self, verification: Option<VerificationResult>) -> Self {
        self.verification = verification;
        self
    }

    pub fn build(self) -> ImageMetadata {
        ImageMetadata {
            exif: self.exif,
            file_type: self.file_type,
            file_size: self.file_size,
            file_name: self.file_name,
            dimensions: self.dimensions,
            container_scan: self.container_scan.unwrap_or_default(),
            verification: self.verification,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
