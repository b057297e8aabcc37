//! Classification — deterministic AI-vs-camera verdicts
//!
//! No model inference, no network calls. The classifier runs a fixed,
//! ordered cascade of evidence rules over [`ImageMetadata`]; the first
//! rule with enough evidence decides, and the last rule always decides.
//! Identical metadata therefore always produces an identical verdict.

mod device;
mod rules;
mod verdict;
mod vocab;

pub use device::DeviceEvidence;
pub use verdict::{EvidenceWeight, Sign, Verdict};
pub use vocab::Vocabulary;

use rules::{build_rules, Accrual, Rule, RuleContext};
use vocab::CompiledVocabulary;

use crate::metadata::ImageMetadata;
use crate::VerishotResult;

pub struct Classifier {
    vocab: CompiledVocabulary,
    rules: Vec<Box<dyn Rule>>,
}

impl Classifier {
    pub fn new(vocabulary: &Vocabulary) -> VerishotResult<Self> {
        Ok(Self {
            vocab: vocabulary.compile()?,
            rules: build_rules(),
        })
    }

    pub fn classify(&self, meta: &ImageMetadata) -> Verdict {
        let ctx = RuleContext {
            meta,
            device: DeviceEvidence::from_metadata(meta),
            vocab: &self.vocab,
            software: meta.software_normalized(),
            file_name: meta.file_name_normalized(),
        };
        let mut accrual = Accrual::default();
        for rule in &self.rules {
            if let Some(verdict) = rule.evaluate(&ctx, &mut accrual) {
                tracing::debug!("rule '{}' decided: {}", rule.name(), verdict);
                return verdict;
            }
        }
        unreachable!("rule cascade must end in a terminal group")
    }
}
