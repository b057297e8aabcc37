//! Verdict and evidence types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction a piece of evidence pulls the verdict.
///
/// Serialized numerically: `+1` favors AI, `-1` favors camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Sign {
    FavorsAi,
    FavorsCamera,
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> i8 {
        match sign {
            Sign::FavorsAi => 1,
            Sign::FavorsCamera => -1,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::FavorsAi),
            -1 => Ok(Sign::FavorsCamera),
            other => Err(format!("invalid evidence sign: {}", other)),
        }
    }
}

/// One labeled, weighted contribution to the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceWeight {
    pub label: String,
    pub weight: f64,
    pub sign: Sign,
}

impl EvidenceWeight {
    pub fn new(label: impl Into<String>, weight: f64, sign: Sign) -> Self {
        Self {
            label: label.into(),
            weight,
            sign,
        }
    }
}

/// The classifier's decision for one image.
///
/// `score` is a signed heuristic magnitude (positive leans AI, negative
/// leans camera); `confidence` is the 0-100 presentation value. The two
/// are set together by whichever rule decided, not derived from each
/// other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_ai: bool,
    pub confidence: u8,
    pub reasons: Vec<String>,
    pub score: f64,
    pub breakdown: Vec<EvidenceWeight>,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let call = if self.is_ai {
            "AI-GENERATED"
        } else {
            "CAMERA-CAPTURED"
        };
        write!(f, "{} ({}% confidence)", call, self.confidence)
    }
}
