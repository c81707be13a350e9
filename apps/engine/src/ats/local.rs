//! Local heuristic analyzer: the offline stand-in used when the scoring
//! backend is unreachable. Pure keyword matching, no I/O.

use rand::Rng;
use serde_json::json;

use crate::models::job::JobDescription;
use crate::models::resume::GeneratedResume;

use super::result::{AtsResult, ScoreSource};

/// Base score assumed when a resume carries no provisional ATS score.
const DEFAULT_BASE_SCORE: f64 = 50.0;

/// Missing keywords reported per analysis.
const MAX_MISSING_KEYWORDS: usize = 10;

/// Terms matched between posting and resume content, case-insensitively.
const TECH_VOCABULARY: &[&str] = &[
    "React",
    "JavaScript",
    "TypeScript",
    "Node.js",
    "Python",
    "AWS",
    "Docker",
    "Kubernetes",
    "PostgreSQL",
    "MongoDB",
    "API",
    "REST",
    "GraphQL",
    "Git",
    "CI/CD",
    "Agile",
    "Scrum",
];

const KEYWORD_RECOMMENDATION: &str =
    "Add role-specific keywords and technologies found in the job description";
const FORMATTING_RECOMMENDATION: &str =
    "Adjust formatting to increase ATS readability (headings, simple fonts)";

/// Scores a resume against a posting using the fixed vocabulary.
///
/// The blended score weighs the generation-time provisional score at 0.6 and
/// keyword coverage at 0.4. Format compliance is a bounded pseudo-random
/// value in [80, 100) standing in for a real layout check; everything else
/// is deterministic for equal inputs.
pub fn local_analysis(resume: &GeneratedResume, job: &JobDescription) -> AtsResult {
    let posting = if job.description.is_empty() {
        &job.title
    } else {
        &job.description
    };
    let keywords = extract_keywords(posting);

    let resume_text = resume.content.searchable_text().to_lowercase();
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for keyword in &keywords {
        if resume_text.contains(&keyword.to_lowercase()) {
            matched.push(*keyword);
        } else {
            missing.push(*keyword);
        }
    }
    missing.truncate(MAX_MISSING_KEYWORDS);

    let keyword_match = if keywords.is_empty() {
        0.0
    } else {
        (matched.len() as f64 / keywords.len() as f64 * 100.0).round()
    };

    let base_score = resume.ats_score.map(f64::from).unwrap_or(DEFAULT_BASE_SCORE);
    let score = (base_score * 0.6 + keyword_match * 0.4).round().min(100.0);

    let mut recommendations = resume.recommendations.clone();
    if keyword_match < 80.0 {
        recommendations.push(KEYWORD_RECOMMENDATION.to_string());
    }
    if score < 80.0 {
        recommendations.push(FORMATTING_RECOMMENDATION.to_string());
    }

    AtsResult {
        score,
        keyword_match,
        missing_keywords: missing.iter().map(|s| s.to_string()).collect(),
        recommendations,
        format_compliance: f64::from(rand::thread_rng().gen_range(80..100)),
        source: ScoreSource::LocalFallback,
        details: json!({
            "source": "local-fallback",
            "matchedKeywords": matched,
            "baseScore": base_score,
        }),
    }
}

/// Returns the vocabulary terms present in the posting text.
fn extract_keywords(posting: &str) -> Vec<&'static str> {
    let posting_lower = posting.to_lowercase();
    TECH_VOCABULARY
        .iter()
        .copied()
        .filter(|keyword| posting_lower.contains(&keyword.to_lowercase()))
        .collect()
}
