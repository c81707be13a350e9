//! ATS evaluation result and the defensive normalization applied to remote
//! scoring responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a result came from. Fallback scores are heuristic; callers must not
/// treat them as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreSource {
    Remote,
    LocalFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsResult {
    pub score: f64,
    pub keyword_match: f64,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
    pub format_compliance: f64,
    pub source: ScoreSource,
    /// Backend-defined payload, passed through untouched.
    pub details: Value,
}

impl AtsResult {
    /// Normalizes a raw scoring response field by field: numerics default to
    /// 0 when missing or non-numeric, lists to empty when not actually
    /// lists. `details` falls back to the entire response object when the
    /// backend sent none.
    pub fn from_remote_payload(payload: Value) -> Self {
        let score = number_field(&payload, "score");
        let keyword_match = number_field(&payload, "keywordMatch");
        let format_compliance = number_field(&payload, "formatCompliance");
        let missing_keywords = list_field(&payload, "missingKeywords");
        let recommendations = list_field(&payload, "recommendations");

        let details = payload
            .get("details")
            .filter(|d| !d.is_null())
            .cloned()
            .unwrap_or(payload);

        AtsResult {
            score,
            keyword_match,
            missing_keywords,
            recommendations,
            format_compliance,
            source: ScoreSource::Remote,
            details,
        }
    }
}

fn number_field(payload: &Value, key: &str) -> f64 {
    payload.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn list_field(payload: &Value, key: &str) -> Vec<String> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
