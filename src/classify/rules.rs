//! The evidence rule cascade
//!
//! Rules run in a fixed order. Early rules may accrue context (reasons
//! carried into whatever verdict eventually wins) or decide outright;
//! the final rule always decides, so every classification terminates
//! with a verdict. Order encodes priority: an explicit AI tool name in
//! the Software tag beats camera EXIF, which beats filename heuristics.

use crate::classify::device::DeviceEvidence;
use crate::classify::verdict::{EvidenceWeight, Sign, Verdict};
use crate::classify::vocab::CompiledVocabulary;
use crate::metadata::ImageMetadata;

/// Immutable inputs shared by every rule. Normalized strings are
/// computed once here rather than in each rule.
pub(super) struct RuleContext<'a> {
    pub meta: &'a ImageMetadata,
    pub device: DeviceEvidence,
    pub vocab: &'a CompiledVocabulary,
    /// Software tag, trimmed and lowercased. Empty when missing.
    pub software: String,
    /// File name, lowercased.
    pub file_name: String,
}

/// Reasons and weights gathered by non-terminal rules, consumed by the
/// rule that decides.
#[derive(Default)]
pub(super) struct Accrual {
    pub reasons: Vec<String>,
    pub breakdown: Vec<EvidenceWeight>,
}

pub(super) trait Rule {
    fn name(&self) -> &'static str;

    /// Returns `Some` to decide the verdict and stop the cascade.
    fn evaluate(&self, ctx: &RuleContext<'_>, accrual: &mut Accrual) -> Option<Verdict>;
}

pub(super) fn build_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ProvenanceAnnotation),
        Box::new(AiToolSignature),
        Box::new(DeviceCaptureEvidence),
        Box::new(MessagingReencode),
        Box::new(InsufficientCameraEvidence),
    ]
}

/// Records container scan and verification findings without deciding.
/// Provenance data proves a C2PA-aware tool touched the file, not which
/// kind of tool, so the verdict itself comes from later rules.
struct ProvenanceAnnotation;

impl Rule for ProvenanceAnnotation {
    fn name(&self) -> &'static str {
        "provenance-annotation"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, accrual: &mut Accrual) -> Option<Verdict> {
        if ctx.meta.container_scan.present {
            accrual
                .reasons
                .push("C2PA provenance data detected (JUMBF).".to_string());
        }
        if let Some(verification) = &ctx.meta.verification {
            accrual.reasons.push(verification.reason());
        }
        None
    }
}

/// A known generator name in the Software tag is the strongest single
/// signal and decides immediately.
struct AiToolSignature;

impl Rule for AiToolSignature {
    fn name(&self) -> &'static str {
        "ai-tool-signature"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, accrual: &mut Accrual) -> Option<Verdict> {
        if !ctx.vocab.matches_ai_tool(&ctx.software) {
            return None;
        }
        accrual.reasons.push(format!(
            "Software indicates AI generator: \"{}\".",
            ctx.software
        ));
        accrual.breakdown.push(EvidenceWeight::new(
            "AI tool in Software",
            0.9,
            Sign::FavorsAi,
        ));
        Some(Verdict {
            is_ai: true,
            confidence: 90,
            reasons: std::mem::take(&mut accrual.reasons),
            score: 5.0,
            breakdown: std::mem::take(&mut accrual.breakdown),
        })
    }
}

/// Coherent camera EXIF decides for camera capture, with confidence
/// scaled by how much of the device tag cluster is present.
struct DeviceCaptureEvidence;

impl Rule for DeviceCaptureEvidence {
    fn name(&self) -> &'static str {
        "device-capture-evidence"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, accrual: &mut Accrual) -> Option<Verdict> {
        if ctx.meta.exif.is_empty() || !ctx.device.indicates_capture() {
            return None;
        }
        let device = ctx.device;

        let mut parts = Vec::new();
        if let Some(make) = ctx.meta.exif.text("Make") {
            parts.push(format!("Make: {}", make));
        }
        if let Some(model) = ctx.meta.exif.text("Model") {
            parts.push(format!("Model: {}", model));
        }
        if device.has_exposure {
            parts.push("Exposure data present".to_string());
        }
        if let Some(lens) = ctx.meta.exif.text("LensModel") {
            parts.push(format!("Lens: {}", lens));
        }
        if device.has_gps {
            parts.push("GPS present".to_string());
        }
        if device.has_date {
            parts.push("DateTimeOriginal present".to_string());
        }
        accrual
            .reasons
            .push(format!("Camera metadata found ({}).", parts.join(", ")));

        let confidence = (70.0 + (device.score * 8.0).round()).min(96.0) as u8;

        accrual.breakdown.push(EvidenceWeight::new(
            "Camera make/model",
            if device.make_model_pair() { 0.6 } else { 0.0 },
            Sign::FavorsCamera,
        ));
        accrual.breakdown.push(EvidenceWeight::new(
            "Exposure params",
            if device.has_exposure { 0.4 } else { 0.0 },
            Sign::FavorsCamera,
        ));
        let mut locality = 0.0;
        if device.has_gps {
            locality += 0.2;
        }
        if device.has_date {
            locality += 0.1;
        }
        if device.has_lens {
            locality += 0.1;
        }
        accrual.breakdown.push(EvidenceWeight::new(
            "GPS/Date/Lens",
            locality,
            Sign::FavorsCamera,
        ));

        Some(Verdict {
            is_ai: false,
            confidence,
            reasons: std::mem::take(&mut accrual.reasons),
            score: -device.score.max(2.0),
            breakdown: std::mem::take(&mut accrual.breakdown),
        })
    }
}

/// Messaging apps strip EXIF wholesale when re-encoding received photos.
/// A stripped file whose name or geometry fits that pipeline is more
/// likely a real photo than a generator export.
struct MessagingReencode;

impl Rule for MessagingReencode {
    fn name(&self) -> &'static str {
        "messaging-reencode"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, accrual: &mut Accrual) -> Option<Verdict> {
        if !ctx.meta.exif.is_empty() {
            return None;
        }
        let name_hit = ctx.vocab.matches_messaging_app(&ctx.file_name)
            || ctx.vocab.has_camera_prefix(&ctx.file_name);
        let geometry_hit = ctx.meta.dimensions.map_or(false, |dims| {
            let longer = dims.longer_side();
            let aspect = dims.aspect_ratio();
            longer > 600 && longer <= 2048 && aspect > 1.2 && aspect < 2.0
        });
        if !name_hit && !geometry_hit {
            return None;
        }
        accrual.reasons.push(
            "No EXIF, but dimensions/name suggest messaging app re-encode (likely real photo)."
                .to_string(),
        );
        Some(Verdict {
            is_ai: false,
            confidence: 55,
            reasons: std::mem::take(&mut accrual.reasons),
            score: -0.5,
            breakdown: std::mem::take(&mut accrual.breakdown),
        })
    }
}

/// Terminal rule. Absent convincing camera evidence the verdict defaults
/// to AI, with confidence tracking how little device evidence there is.
struct InsufficientCameraEvidence;

impl Rule for InsufficientCameraEvidence {
    fn name(&self) -> &'static str {
        "insufficient-camera-evidence"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, accrual: &mut Accrual) -> Option<Verdict> {
        let is_png = ctx.meta.file_type.to_lowercase().contains("png");
        if is_png && ctx.meta.exif.is_empty() {
            accrual
                .reasons
                .push("PNG has no EXIF; common for AI exports.".to_string());
            accrual
                .breakdown
                .push(EvidenceWeight::new("PNG no EXIF", 0.3, Sign::FavorsAi));
        }
        accrual.reasons.push(
            "Insufficient camera metadata (make/model/exposure/date/GPS).".to_string(),
        );
        accrual.breakdown.push(EvidenceWeight::new(
            "Missing camera EXIF",
            0.5,
            Sign::FavorsAi,
        ));
        if ctx.vocab.matches_editor(&ctx.software) {
            accrual
                .reasons
                .push("Edited in an image editor (not conclusive).".to_string());
            accrual
                .breakdown
                .push(EvidenceWeight::new("Edited in editor", 0.1, Sign::FavorsAi));
        }

        let device_score = ctx.device.score;
        let confidence = (55.0 + ((2.0 - device_score.min(2.0)) * 10.0).round()).min(88.0) as u8;

        Some(Verdict {
            is_ai: true,
            confidence,
            reasons: std::mem::take(&mut accrual.reasons),
            score: 2.0 - device_score,
            breakdown: std::mem::take(&mut accrual.breakdown),
        })
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
