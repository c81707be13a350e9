//! Draft constructors for per-provider generation outcomes.

use chrono::Utc;
use rand::Rng;

use crate::models::resume::{GeneratedResume, Provider, ResumeContent};
use crate::models::template::DEFAULT_TEMPLATE_ID;

/// Builds the draft for a provider that returned content.
///
/// The provisional scores are salted heuristics standing in for real
/// pre-scoring: ATS in [70, 100), keyword match in [60, 100). Authoritative
/// scoring is a separate, explicit evaluation step.
pub(crate) fn success_draft(provider: Provider, content: String) -> GeneratedResume {
    let mut rng = rand::thread_rng();
    GeneratedResume {
        id: draft_id(provider),
        ai_provider: provider,
        content: ResumeContent::PlainText(content),
        ats_score: Some(rng.gen_range(70..100)),
        keyword_match: Some(rng.gen_range(60..100)),
        recommendations: default_recommendations(provider),
        timestamp: Utc::now(),
        template: DEFAULT_TEMPLATE_ID.to_string(),
    }
}

/// Builds the placeholder draft for a provider whose call failed: empty
/// content, zero scores, one unavailability note. Same id scheme as a
/// success so the entry stays provider-attributable.
pub(crate) fn unavailable_draft(provider: Provider) -> GeneratedResume {
    GeneratedResume {
        id: draft_id(provider),
        ai_provider: provider,
        content: ResumeContent::PlainText(String::new()),
        ats_score: Some(0),
        keyword_match: Some(0),
        recommendations: vec![format!("{provider} is currently unavailable.")],
        timestamp: Utc::now(),
        template: DEFAULT_TEMPLATE_ID.to_string(),
    }
}

/// `{provider}-{unix_millis}`.
fn draft_id(provider: Provider) -> String {
    format!("{}-{}", provider, Utc::now().timestamp_millis())
}

/// Generic recommendations keyed by provider identity. Identical for every
/// provider today.
fn default_recommendations(provider: Provider) -> Vec<String> {
    match provider {
        Provider::Llama | Provider::Mistral | Provider::DeepSeek | Provider::Gemini => vec![
            "Better keyword density optimization".to_string(),
            "Improve readability score".to_string(),
            "Add more relevant technologies".to_string(),
        ],
    }
}
