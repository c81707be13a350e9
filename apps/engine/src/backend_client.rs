//! Backend client: the single point of entry for calls to the external
//! generation/scoring service.
//!
//! No other module issues HTTP requests. Callers hold the `GenerationApi` and
//! `ScoringApi` seams as `Arc<dyn _>`, so tests swap in scripted
//! implementations without a network.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::job::JobDescription;
use crate::models::profile::UserProfile;
use crate::models::resume::{Provider, ResumeContent};

const GENERATE_RESUME_PATH: &str = "/generate-resume";
const GENERATE_ATS_PATH: &str = "/generate-ats";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResumeRequest<'a> {
    profile: &'a UserProfile,
    job_description: &'a JobDescription,
    ai_provider: Provider,
}

#[derive(Debug, Deserialize)]
struct GenerateResumeResponse {
    resume: String,
}

/// Identity-plus-content slice of a resume carried in the scoring payload.
#[derive(Debug, Serialize)]
pub struct ResumeRef<'a> {
    pub id: &'a str,
    pub content: &'a ResumeContent,
}

/// Scoring payload. `force` and `nonce` are passed through so the remote side
/// may skip its own server-side caching; absent optionals are omitted from
/// the JSON entirely.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest<'a> {
    pub resume: ResumeRef<'a>,
    pub job_description: &'a JobDescription,
    pub force: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_override: Option<&'a str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Service seams
// ────────────────────────────────────────────────────────────────────────────

/// One resume-generation call against the backend. Any transport error or
/// non-success status is a provider failure; no retries at this layer.
#[async_trait]
pub trait GenerationApi: Send + Sync {
    async fn generate_resume(
        &self,
        profile: &UserProfile,
        job: &JobDescription,
        provider: Provider,
    ) -> Result<String, BackendError>;
}

/// One scoring call against the backend. Returns the raw JSON body; the
/// scoring engine owns normalization.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    async fn score_resume(&self, request: &ScoreRequest<'_>) -> Result<Value, BackendError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP implementation
// ────────────────────────────────────────────────────────────────────────────

/// The HTTP client used for all backend calls.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: trim_base_url(&config.api_base),
        }
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, BackendError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl GenerationApi for BackendClient {
    async fn generate_resume(
        &self,
        profile: &UserProfile,
        job: &JobDescription,
        provider: Provider,
    ) -> Result<String, BackendError> {
        let request = GenerateResumeRequest {
            profile,
            job_description: job,
            ai_provider: provider,
        };

        let response = self.post_json(GENERATE_RESUME_PATH, &request).await?;
        let body: GenerateResumeResponse = response.json().await?;

        debug!(
            "Generation call succeeded for {}: {} chars",
            provider,
            body.resume.len()
        );

        Ok(body.resume)
    }
}

#[async_trait]
impl ScoringApi for BackendClient {
    async fn score_resume(&self, request: &ScoreRequest<'_>) -> Result<Value, BackendError> {
        let response = self.post_json(GENERATE_ATS_PATH, request).await?;
        let body: Value = response.json().await?;

        debug!(
            "Scoring call succeeded for resume {} (force={})",
            request.resume.id, request.force
        );

        Ok(body)
    }
}

/// Drops trailing slashes so path joining never produces `//generate-resume`.
fn trim_base_url(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
