//! Normalization of external C2PA verification output
//!
//! Verification services disagree on field names: some report `status`,
//! others `verificationStatus`, a few only a boolean `ok`. This module
//! folds the shapes seen in the wild into one record. Whatever status
//! string the verifier produced is passed through untouched; verishot
//! does not re-validate signatures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: String,
    pub issuer: Option<String>,
    pub claims: Option<Value>,
}

impl VerificationResult {
    /// Extract a verification record from raw verifier JSON.
    ///
    /// Returns `None` when the value is not an object or carries no
    /// recognizable status field.
    pub fn normalize(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;

        let status = obj
            .get("status")
            .or_else(|| obj.get("verificationStatus"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| match obj.get("ok").and_then(Value::as_bool) {
                Some(true) => Some("verified".to_string()),
                _ => None,
            })?;

        let issuer = obj
            .get("issuer")
            .or_else(|| obj.get("signer"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let claims = obj
            .get("claims")
            .or_else(|| obj.get("manifest"))
            .cloned()
            .filter(|v| !v.is_null());

        Some(Self {
            status,
            issuer,
            claims,
        })
    }

    /// Human-readable sentence for verdict reason lists.
    pub fn reason(&self) -> String {
        match &self.issuer {
            Some(issuer) => format!(
                "C2PA verification: {} (issuer: {}).",
                self.status, issuer
            ),
            None => format!("C2PA verification: {}.", self.status),
        }
    }
}
