//! Container scanning — byte-level detection of embedded provenance data
//!
//! JPEG and PNG files carry C2PA manifests in format-specific envelopes:
//! JUMBF superboxes inside APP11 segments for JPEG, and text chunks
//! (usually iTXt) for PNG. This module walks the container structure
//! directly so detection works without a full image decoder, and keeps
//! working on files too damaged for one.

pub mod jpeg;
pub mod png;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::metadata::Dimensions;

pub(crate) const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Container format recognized from the leading file signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Jpeg,
    Png,
    /// Signature matched neither format; nothing was scanned.
    None,
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Jpeg => write!(f, "jpeg"),
            Container::Png => write!(f, "png"),
            Container::None => write!(f, "none"),
        }
    }
}

/// Structural element inspected during the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    #[serde(rename = "APP11")]
    App11,
    #[serde(rename = "iTXt")]
    Itxt,
    #[serde(rename = "tEXt")]
    Text,
    #[serde(rename = "zTXt")]
    Ztxt,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::App11 => write!(f, "APP11"),
            SegmentKind::Itxt => write!(f, "iTXt"),
            SegmentKind::Text => write!(f, "tEXt"),
            SegmentKind::Ztxt => write!(f, "zTXt"),
        }
    }
}

/// One inspected segment or chunk, recorded whether or not it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Offset of the segment marker (JPEG) or chunk length field (PNG)
    /// from the start of the file.
    pub byte_offset: usize,
    /// JPEG: declared segment length (includes its own two bytes).
    /// PNG: declared chunk data length.
    pub byte_length: usize,
    pub matched_signature: bool,
}

/// Outcome of a container scan.
///
/// `present` is true exactly when some recorded segment matched a
/// provenance signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerScanResult {
    pub present: bool,
    pub container: Container,
    pub segments: Vec<Segment>,
}

impl ContainerScanResult {
    pub fn absent(container: Container) -> Self {
        Self {
            present: false,
            container,
            segments: Vec::new(),
        }
    }

    /// The segment that carried the provenance signature, if any.
    pub fn matched(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.matched_signature)
    }
}

impl Default for ContainerScanResult {
    fn default() -> Self {
        Self::absent(Container::None)
    }
}

/// Scan raw image bytes for embedded provenance markers.
///
/// Dispatches on the file signature; bytes that start with neither a
/// JPEG SOI nor a PNG signature yield an absent result with
/// [`Container::None`].
pub fn scan(bytes: &[u8]) -> ContainerScanResult {
    if bytes.len() >= 2 && bytes[..2] == JPEG_SOI {
        jpeg::scan_jpeg(bytes)
    } else if bytes.len() >= 8 && bytes[..8] == PNG_SIGNATURE {
        png::scan_png(bytes)
    } else {
        ContainerScanResult::absent(Container::None)
    }
}

/// Best-effort pixel dimensions from container headers.
///
/// PNG: read from the IHDR chunk, which the format requires first.
/// JPEG: walk segments to the first SOF0/SOF2 frame header. Returns
/// `None` rather than zero-sized dimensions on malformed headers.
pub fn probe_dimensions(bytes: &[u8]) -> Option<Dimensions> {
    if bytes.len() >= 24 && bytes[..8] == PNG_SIGNATURE {
        if &bytes[12..16] != b"IHDR" {
            return None;
        }
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        if width > 0 && height > 0 {
            return Some(Dimensions::new(width, height));
        }
        return None;
    }

    if bytes.len() >= 2 && bytes[..2] == JPEG_SOI {
        let mut i = 2usize;
        // SOF payload layout: precision byte, then height u16, width u16
        while i + 9 < bytes.len() {
            if bytes[i] == 0xFF && (bytes[i + 1] == 0xC0 || bytes[i + 1] == 0xC2) {
                let height = u16::from_be_bytes([bytes[i + 5], bytes[i + 6]]) as u32;
                let width = u16::from_be_bytes([bytes[i + 7], bytes[i + 8]]) as u32;
                if width > 0 && height > 0 {
                    return Some(Dimensions::new(width, height));
                }
                return None;
            } else if bytes[i] == 0xFF && bytes[i + 1] != 0x00 {
                let seg_len = u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]) as usize;
                i += 2 + seg_len;
            } else {
                i += 1;
            }
        }
    }

    None
}

// ─── Tests ──────────────────────────────────────────────────────────────────
