//! Job description: structured target posting handed to generation and
//! scoring.
//!
//! `from_posting` is the derivation step the input form performs upstream:
//! pull requirement lines and a keyword inventory out of the raw description
//! so downstream components never re-parse free text.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::EngineError;

/// Company name substituted when the posting leaves the field blank.
pub const FALLBACK_COMPANY: &str = "Target Company";

/// Requirement lines kept per posting.
const MAX_REQUIREMENTS: usize = 5;

/// Technical terms scanned for in postings. Membership is tested by
/// case-insensitive substring.
const POSTING_KEYWORDS: &[&str] = &[
    "React",
    "JavaScript",
    "TypeScript",
    "Node.js",
    "Python",
    "Java",
    "AWS",
    "Docker",
    "Kubernetes",
    "PostgreSQL",
    "MongoDB",
    "MySQL",
    "REST",
    "GraphQL",
    "API",
    "Microservices",
    "CI/CD",
    "Git",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    pub title: String,
    pub company: String,
    pub description: String,
    /// May arrive from loosely-typed callers as a bare string; normalized to
    /// a list on deserialization so the scoring payload always carries arrays.
    #[serde(default, deserialize_with = "string_or_list")]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub keywords: Vec<String>,
}

impl JobDescription {
    /// Builds a `JobDescription` from raw posting fields, deriving the
    /// requirement lines and keyword list from the description text.
    ///
    /// Title and description must be non-blank; this is the upstream
    /// validation the pipeline components rely on and do not repeat.
    pub fn from_posting(
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let title = title.into();
        let company = company.into();
        let description = description.into();

        if title.trim().is_empty() {
            return Err(EngineError::Validation(
                "Job title cannot be empty".to_string(),
            ));
        }
        if description.trim().is_empty() {
            return Err(EngineError::Validation(
                "Job description cannot be empty".to_string(),
            ));
        }

        let requirements = derive_requirements(&description);
        let keywords = derive_keywords(&description);
        let company = if company.trim().is_empty() {
            FALLBACK_COMPANY.to_string()
        } else {
            company
        };

        Ok(JobDescription {
            title,
            company,
            description,
            requirements,
            keywords,
        })
    }
}

/// Collects the lines that read like requirements: anything mentioning
/// "require" or "must have", trimmed, capped at `MAX_REQUIREMENTS`.
fn derive_requirements(description: &str) -> Vec<String> {
    description
        .lines()
        .filter(|line| {
            let lower = line.to_lowercase();
            lower.contains("require") || lower.contains("must have")
        })
        .map(|line| line.trim().to_string())
        .take(MAX_REQUIREMENTS)
        .collect()
}

/// Returns every vocabulary term present in the description.
fn derive_keywords(description: &str) -> Vec<String> {
    let description_lower = description.to_lowercase();
    POSTING_KEYWORDS
        .iter()
        .filter(|keyword| description_lower.contains(&keyword.to_lowercase()))
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Accepts a JSON list, a bare string, or null/absent for a list field.
/// A bare non-empty string becomes a one-element list; null and the empty
/// string become an empty list.
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<StringOrList>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(StringOrList::One(s)) if s.is_empty() => Vec::new(),
        Some(StringOrList::One(s)) => vec![s],
        Some(StringOrList::Many(list)) => list,
    })
}
