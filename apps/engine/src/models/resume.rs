//! Generated resume entities: the provider set, the content union, and the
//! per-provider draft record.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of generation providers, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Llama,
    Mistral,
    DeepSeek,
    Gemini,
}

impl Provider {
    /// Declaration order is the dispatch and result order.
    pub const ALL: [Provider; 4] = [
        Provider::Llama,
        Provider::Mistral,
        Provider::DeepSeek,
        Provider::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Llama => "llama",
            Provider::Mistral => "mistral",
            Provider::DeepSeek => "deepseek",
            Provider::Gemini => "gemini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resume body as produced by a provider: either free text or a structured
/// document. Untagged so the wire value stays a bare string or object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResumeContent {
    PlainText(String),
    Structured(ResumeDocument),
}

impl ResumeContent {
    /// Length of the canonical representation: byte length of the text, or
    /// of the serialized JSON for structured content. Used by the scoring
    /// cache fingerprint, so it must be stable for equal content.
    pub fn canonical_len(&self) -> usize {
        match self {
            ResumeContent::PlainText(text) => text.len(),
            ResumeContent::Structured(doc) => {
                serde_json::to_string(doc).map_or(0, |json| json.len())
            }
        }
    }

    /// Flat text rendition for keyword matching.
    pub fn searchable_text(&self) -> Cow<'_, str> {
        match self {
            ResumeContent::PlainText(text) => Cow::Borrowed(text.as_str()),
            ResumeContent::Structured(doc) => {
                Cow::Owned(serde_json::to_string(doc).unwrap_or_default())
            }
        }
    }
}

/// Structured resume document; every section is optional because providers
/// return whatever subset they managed to fill in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Category name to skill list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<Vec<ExperienceSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSection {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationSection {
    pub degree: String,
    pub institution: String,
    pub graduation_date: String,
}

/// One provider's draft for a single generation request. Immutable once
/// built; a fresh ATS evaluation yields a separate `AtsResult`, never a
/// mutation of this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    /// `{provider}-{unix_millis}`, unique and provider-attributable.
    pub id: String,
    pub ai_provider: Provider,
    pub content: ResumeContent,
    /// Provisional estimate assigned at generation time, not authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_match: Option<u32>,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub template: String,
}

impl GeneratedResume {
    /// Comparison key for best-resume selection: provisional ATS score plus
    /// keyword match, absent fields counting as zero.
    pub fn provisional_sum(&self) -> u32 {
        self.ats_score.unwrap_or(0) + self.keyword_match.unwrap_or(0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
