//! ATS scoring engine: remote evaluation with a session cache and a local
//! heuristic fallback.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::backend_client::{ResumeRef, ScoreRequest, ScoringApi};
use crate::models::job::JobDescription;
use crate::models::resume::GeneratedResume;

use super::cache::{AtsCache, Fingerprint};
use super::local::local_analysis;
use super::result::AtsResult;

/// Per-call evaluation options.
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    /// Bypass the cache entirely. A forced call neither reads nor writes it,
    /// so a forced re-check never replaces an entry a normal lookup trusts.
    pub force: bool,
    /// Extra fingerprint salt, for busting the cache without `force`.
    pub nonce: Option<u64>,
    /// Forwarded to the backend verbatim.
    pub model_override: Option<String>,
}

/// Scores resumes against job postings. Owns the result cache; constructed
/// once and shared by reference.
pub struct ScoringEngine {
    backend: Arc<dyn ScoringApi>,
    cache: Mutex<AtsCache>,
}

impl ScoringEngine {
    pub fn new(backend: Arc<dyn ScoringApi>, cache_capacity: usize) -> Self {
        Self {
            backend,
            cache: Mutex::new(AtsCache::with_capacity(cache_capacity)),
        }
    }

    /// Evaluates one resume against a job.
    ///
    /// Non-forced calls return a cached result when the fingerprint is known;
    /// otherwise the backend is asked and the normalized result stored. When
    /// the backend fails (transport error or non-success status) the local
    /// analyzer supplies the result, cached under the same non-forced rule.
    /// The returned shape is identical either way apart from `source`.
    pub async fn evaluate(
        &self,
        resume: &GeneratedResume,
        job: &JobDescription,
        options: ScoreOptions,
    ) -> AtsResult {
        let key = Fingerprint::new(resume, job, options.nonce);

        if !options.force {
            if let Some(hit) = self.lock_cache().get(&key) {
                debug!("ATS cache hit for {}", key.as_str());
                return hit;
            }
        }

        let request = ScoreRequest {
            resume: ResumeRef {
                id: &resume.id,
                content: &resume.content,
            },
            job_description: job,
            force: options.force,
            nonce: options.nonce,
            model_override: options.model_override.as_deref(),
        };

        // The cache lock is never held across this await. Two concurrent
        // misses for one fingerprint may both reach the backend; the last
        // write wins.
        let result = match self.backend.score_resume(&request).await {
            Ok(payload) => AtsResult::from_remote_payload(payload),
            Err(error) => {
                warn!(
                    "Scoring backend failed for resume {}: {}; using local analysis",
                    resume.id, error
                );
                local_analysis(resume, job)
            }
        };

        if !options.force {
            self.lock_cache().insert(key, result.clone());
        }

        result
    }

    /// Non-triggering peek: returns the cached result for the bare
    /// fingerprint (no nonce), without network access or a recency update.
    pub fn cached(&self, resume: &GeneratedResume, job: &JobDescription) -> Option<AtsResult> {
        let key = Fingerprint::new(resume, job, None);
        self.lock_cache().peek(&key).cloned()
    }

    fn lock_cache(&self) -> MutexGuard<'_, AtsCache> {
        // A panic while holding the lock cannot leave partial state; the
        // cache is safe to reuse after poisoning.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::result::ScoreSource;
    use crate::backend_client::BackendError;
    use crate::models::resume::{Provider, ResumeContent};
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted backend: counts calls, records what each request carried,
    /// and answers with a payload carrying the call number so distinct
    /// network round trips produce distinct results.
    struct FakeBackend {
        calls: AtomicUsize,
        fail: bool,
        seen: Mutex<Vec<SeenRequest>>,
    }

    struct SeenRequest {
        force: bool,
        nonce: Option<u64>,
        model_override: Option<String>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScoringApi for FakeBackend {
        async fn score_resume(&self, request: &ScoreRequest<'_>) -> Result<Value, BackendError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.seen.lock().unwrap().push(SeenRequest {
                force: request.force,
                nonce: request.nonce,
                model_override: request.model_override.map(String::from),
            });

            if self.fail {
                return Err(BackendError::Api {
                    status: 503,
                    message: "scoring unavailable".to_string(),
                });
            }

            Ok(json!({
                "score": 80 + call,
                "keywordMatch": 70,
                "missingKeywords": [],
                "recommendations": [],
                "formatCompliance": 90,
                "details": {"call": call}
            }))
        }
    }

    fn make_resume(id: &str) -> GeneratedResume {
        GeneratedResume {
            id: id.to_string(),
            ai_provider: Provider::Llama,
            content: ResumeContent::PlainText("React and Docker expert.".to_string()),
            ats_score: Some(80),
            keyword_match: Some(70),
            recommendations: vec![],
            timestamp: Utc::now(),
            template: "modern-tech".to_string(),
        }
    }

    fn make_job() -> JobDescription {
        JobDescription::from_posting(
            "Backend Engineer",
            "Initech",
            "We require React and Docker experience.",
        )
        .unwrap()
    }

    fn make_engine(backend: &Arc<FakeBackend>) -> ScoringEngine {
        ScoringEngine::new(backend.clone(), 8)
    }

    /// Run with RUST_LOG=engine=debug to watch cache decisions.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[tokio::test]
    async fn test_repeat_evaluation_is_served_from_cache() {
        let backend = Arc::new(FakeBackend::new());
        let engine = make_engine(&backend);
        let resume = make_resume("llama-1");
        let job = make_job();

        let first = engine
            .evaluate(&resume, &job, ScoreOptions::default())
            .await;
        let second = engine
            .evaluate(&resume, &job, ScoreOptions::default())
            .await;

        assert_eq!(backend.call_count(), 1, "second call must not hit the backend");
        assert_eq!(first, second);
        assert_eq!(first.source, ScoreSource::Remote);
    }

    #[tokio::test]
    async fn test_forced_call_neither_reads_nor_writes_cache() {
        let backend = Arc::new(FakeBackend::new());
        let engine = make_engine(&backend);
        let resume = make_resume("llama-1");
        let job = make_job();

        // Prime the cache.
        let primed = engine
            .evaluate(&resume, &job, ScoreOptions::default())
            .await;

        // Forced call goes to the backend despite the cache entry.
        let forced = engine
            .evaluate(
                &resume,
                &job,
                ScoreOptions {
                    force: true,
                    ..ScoreOptions::default()
                },
            )
            .await;
        assert_eq!(backend.call_count(), 2);
        assert_ne!(forced.score, primed.score);

        // The cached entry survives unchanged.
        let after = engine
            .evaluate(&resume, &job, ScoreOptions::default())
            .await;
        assert_eq!(backend.call_count(), 2);
        assert_eq!(after, primed);

        let forces: Vec<bool> = backend.seen.lock().unwrap().iter().map(|s| s.force).collect();
        assert_eq!(forces, vec![false, true]);
    }

    #[tokio::test]
    async fn test_nonce_salts_the_fingerprint() {
        let backend = Arc::new(FakeBackend::new());
        let engine = make_engine(&backend);
        let resume = make_resume("llama-1");
        let job = make_job();

        engine
            .evaluate(&resume, &job, ScoreOptions::default())
            .await;
        engine
            .evaluate(
                &resume,
                &job,
                ScoreOptions {
                    nonce: Some(42),
                    ..ScoreOptions::default()
                },
            )
            .await;

        // Distinct fingerprints: both reach the backend.
        assert_eq!(backend.call_count(), 2);

        // The salted entry is cached under its own key.
        engine
            .evaluate(
                &resume,
                &job,
                ScoreOptions {
                    nonce: Some(42),
                    ..ScoreOptions::default()
                },
            )
            .await;
        assert_eq!(backend.call_count(), 2);

        let nonces: Vec<Option<u64>> =
            backend.seen.lock().unwrap().iter().map(|s| s.nonce).collect();
        assert_eq!(nonces, vec![None, Some(42)]);
    }

    #[tokio::test]
    async fn test_backend_failure_falls_back_to_local_analysis() {
        init_tracing();
        let backend = Arc::new(FakeBackend::failing());
        let engine = make_engine(&backend);
        let resume = make_resume("llama-1");
        let job = make_job();

        let result = engine
            .evaluate(&resume, &job, ScoreOptions::default())
            .await;

        assert_eq!(result.source, ScoreSource::LocalFallback);
        assert_eq!(result.details["source"], "local-fallback");
        // Both posting terms appear in the resume content.
        assert_eq!(result.keyword_match, 100.0);

        // The fallback result is cached like any other non-forced result.
        let second = engine
            .evaluate(&resume, &job, ScoreOptions::default())
            .await;
        assert_eq!(backend.call_count(), 1);
        assert_eq!(second, result);
    }

    #[tokio::test]
    async fn test_cached_peek_ignores_nonce_and_skips_network() {
        let backend = Arc::new(FakeBackend::new());
        let engine = make_engine(&backend);
        let resume = make_resume("llama-1");
        let job = make_job();

        assert!(engine.cached(&resume, &job).is_none());

        // An entry stored under a salted fingerprint is invisible to the
        // bare-fingerprint peek.
        engine
            .evaluate(
                &resume,
                &job,
                ScoreOptions {
                    nonce: Some(7),
                    ..ScoreOptions::default()
                },
            )
            .await;
        assert!(engine.cached(&resume, &job).is_none());

        engine
            .evaluate(&resume, &job, ScoreOptions::default())
            .await;
        let peeked = engine.cached(&resume, &job);
        assert!(peeked.is_some());

        // Peeking never touched the backend.
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_model_override_reaches_the_wire_without_keying_cache() {
        let backend = Arc::new(FakeBackend::new());
        let engine = make_engine(&backend);
        let resume = make_resume("llama-1");
        let job = make_job();

        engine
            .evaluate(
                &resume,
                &job,
                ScoreOptions {
                    model_override: Some("ats-v2".to_string()),
                    ..ScoreOptions::default()
                },
            )
            .await;

        // The override is not part of the fingerprint, so this hits cache.
        engine
            .evaluate(
                &resume,
                &job,
                ScoreOptions {
                    model_override: Some("ats-v3".to_string()),
                    ..ScoreOptions::default()
                },
            )
            .await;

        assert_eq!(backend.call_count(), 1);
        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].model_override.as_deref(), Some("ats-v2"));
    }
}
