//! Device capture evidence extracted from EXIF tags
//!
//! Real cameras stamp a characteristic cluster of tags that generators
//! rarely fake coherently. Each cluster contributes a fixed weight to a
//! cumulative score; the weights are calibrated so a phone photo with
//! GPS lands around 4-4.5 and a bare make/model pair at 2.0.

use serde::{Deserialize, Serialize};

use crate::metadata::ImageMetadata;

/// Any one of these marks the presence of exposure parameters.
pub const EXPOSURE_TAGS: [&str; 5] = [
    "FNumber",
    "ExposureTime",
    "ISOSpeedRatings",
    "ISO",
    "FocalLength",
];

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeviceEvidence {
    pub has_make: bool,
    pub has_model: bool,
    pub has_exposure: bool,
    pub has_gps: bool,
    pub has_lens: bool,
    pub has_date: bool,
    pub score: f64,
}

impl DeviceEvidence {
    pub fn from_metadata(meta: &ImageMetadata) -> Self {
        let exif = &meta.exif;
        let has_make = exif.has("Make");
        let has_model = exif.has("Model");
        let has_exposure = exif.any_present(&EXPOSURE_TAGS);
        let has_gps = exif.has("GPSLatitude") && exif.has("GPSLongitude");
        let has_lens = exif.has("LensModel");
        let has_date = exif.has("DateTimeOriginal");

        let mut score = 0.0;
        if has_make && has_model {
            score += 2.0;
        }
        if has_exposure {
            score += 1.0;
        }
        if has_gps {
            score += 1.0;
        }
        // Lens and date share a single half-point
        if has_lens || has_date {
            score += 0.5;
        }

        Self {
            has_make,
            has_model,
            has_exposure,
            has_gps,
            has_lens,
            has_date,
            score,
        }
    }

    pub fn make_model_pair(&self) -> bool {
        self.has_make && self.has_model
    }

    /// Gate for the device-capture rule. Lens alone does not qualify.
    pub fn indicates_capture(&self) -> bool {
        self.has_make || self.has_model || self.has_exposure || self.has_date || self.has_gps
    }
}
