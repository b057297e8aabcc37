//! Vocabulary lists and compiled substring matchers
//!
//! The classifier's text heuristics are driven by four word lists:
//! AI generator names matched against the Software tag, messaging app
//! names and camera filename prefixes matched against the file name,
//! and editor names that soften the default verdict. All lists can be
//! overridden from a TOML file; an empty or omitted list falls back to
//! the built-in default rather than disabling the heuristic.

use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{VerishotError, VerishotResult};

const DEFAULT_AI_TOOLS: [&str; 21] = [
    "midjourney",
    "stability",
    "stable diffusion",
    "sdxl",
    "comfyui",
    "invokeai",
    "automatic1111",
    "dalle",
    "openai",
    "firefly",
    "bing image creator",
    "leonardo ai",
    "playground ai",
    "ideogram",
    "pixray",
    "nightcafe",
    "craiyon",
    "gen-2",
    "sd next",
    "flux",
    "recraft",
];

const DEFAULT_MESSAGING_APPS: [&str; 8] = [
    "whatsapp",
    "wa",
    "telegram",
    "signal",
    "messenger",
    "wechat",
    "snapchat",
    "instagram",
];

const DEFAULT_EDITORS: [&str; 3] = ["photoshop", "lightroom", "gimp"];

const DEFAULT_CAMERA_PREFIXES: [&str; 3] = ["img-", "img_", "pxl_"];

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Word lists as configured. Compiled into matchers by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(default)]
    pub ai_tools: Vec<String>,
    #[serde(default)]
    pub messaging_apps: Vec<String>,
    #[serde(default)]
    pub editors: Vec<String>,
    #[serde(default)]
    pub camera_prefixes: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            ai_tools: to_owned(&DEFAULT_AI_TOOLS),
            messaging_apps: to_owned(&DEFAULT_MESSAGING_APPS),
            editors: to_owned(&DEFAULT_EDITORS),
            camera_prefixes: to_owned(&DEFAULT_CAMERA_PREFIXES),
        }
    }
}

impl Vocabulary {
    pub fn from_file(path: &Path) -> VerishotResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut vocab: Vocabulary = toml::from_str(&content)
            .map_err(|e| VerishotError::Config(format!("failed to parse vocabulary: {}", e)))?;
        vocab.fill_defaults();
        Ok(vocab)
    }

    /// Replace any empty list with its built-in default.
    pub(crate) fn fill_defaults(&mut self) {
        if self.ai_tools.is_empty() {
            self.ai_tools = to_owned(&DEFAULT_AI_TOOLS);
        }
        if self.messaging_apps.is_empty() {
            self.messaging_apps = to_owned(&DEFAULT_MESSAGING_APPS);
        }
        if self.editors.is_empty() {
            self.editors = to_owned(&DEFAULT_EDITORS);
        }
        if self.camera_prefixes.is_empty() {
            self.camera_prefixes = to_owned(&DEFAULT_CAMERA_PREFIXES);
        }
    }

    pub(crate) fn compile(&self) -> VerishotResult<CompiledVocabulary> {
        Ok(CompiledVocabulary {
            ai_tools: build_matcher(&self.ai_tools)?,
            messaging_apps: build_matcher(&self.messaging_apps)?,
            editors: build_matcher(&self.editors)?,
            camera_prefixes: self
                .camera_prefixes
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        })
    }
}

fn build_matcher(patterns: &[String]) -> VerishotResult<AhoCorasick> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(patterns)
        .map_err(|e| VerishotError::Config(format!("failed to compile vocabulary: {}", e)))
}

/// Matchers built once per classifier.
#[derive(Debug)]
pub(crate) struct CompiledVocabulary {
    ai_tools: AhoCorasick,
    messaging_apps: AhoCorasick,
    editors: AhoCorasick,
    camera_prefixes: Vec<String>,
}

impl CompiledVocabulary {
    pub(crate) fn matches_ai_tool(&self, text: &str) -> bool {
        self.ai_tools.is_match(text)
    }

    pub(crate) fn matches_messaging_app(&self, text: &str) -> bool {
        self.messaging_apps.is_match(text)
    }

    pub(crate) fn matches_editor(&self, text: &str) -> bool {
        self.editors.is_match(text)
    }

    /// Callers pass the already-lowercased file name.
    pub(crate) fn has_camera_prefix(&self, name: &str) -> bool {
        self.camera_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}
