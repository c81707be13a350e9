//! Fan-out orchestration of the provider set.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::backend_client::{BackendError, GenerationApi};
use crate::models::job::JobDescription;
use crate::models::profile::UserProfile;
use crate::models::resume::{GeneratedResume, Provider};

use super::draft;

/// Dispatches one generation call per provider and assembles the drafts.
pub struct ResumeOrchestrator {
    backend: Arc<dyn GenerationApi>,
}

impl ResumeOrchestrator {
    pub fn new(backend: Arc<dyn GenerationApi>) -> Self {
        Self { backend }
    }

    /// Generates one draft per provider, all calls in flight at once.
    ///
    /// Always returns exactly one entry per provider, in declaration order.
    /// A failed call (or a panicked task) yields that provider's
    /// unavailability placeholder and touches no other provider's result.
    /// No retries; a retry is a caller-initiated new call.
    pub async fn generate(
        &self,
        profile: &UserProfile,
        job: &JobDescription,
    ) -> Vec<GeneratedResume> {
        type GenerationHandle = JoinHandle<Result<String, BackendError>>;

        // Spawn everything before joining anything.
        let handles: Vec<(Provider, GenerationHandle)> = Provider::ALL
            .iter()
            .map(|&provider| {
                let backend = self.backend.clone();
                let profile = profile.clone();
                let job = job.clone();
                let handle = tokio::spawn(async move {
                    backend.generate_resume(&profile, &job, provider).await
                });
                (provider, handle)
            })
            .collect();

        let mut drafts = Vec::with_capacity(handles.len());
        for (provider, handle) in handles {
            let draft = match handle.await {
                Ok(Ok(content)) => draft::success_draft(provider, content),
                Ok(Err(error)) => {
                    warn!("Provider {} failed: {}", provider, error);
                    draft::unavailable_draft(provider)
                }
                Err(join_error) => {
                    warn!("Provider {} task did not complete: {}", provider, join_error);
                    draft::unavailable_draft(provider)
                }
            };
            drafts.push(draft);
        }

        info!(
            "Generated {} drafts for job '{}'",
            drafts.len(),
            job.title
        );

        drafts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{PersonalInfo, SkillSet};
    use crate::models::resume::ResumeContent;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::time::Duration;

    struct FakeGeneration {
        failing: HashSet<Provider>,
    }

    impl FakeGeneration {
        fn succeeding() -> Self {
            Self {
                failing: HashSet::new(),
            }
        }

        fn failing_for(providers: &[Provider]) -> Self {
            Self {
                failing: providers.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl GenerationApi for FakeGeneration {
        async fn generate_resume(
            &self,
            _profile: &UserProfile,
            _job: &JobDescription,
            provider: Provider,
        ) -> Result<String, BackendError> {
            if self.failing.contains(&provider) {
                return Err(BackendError::Api {
                    status: 500,
                    message: "generation failed".to_string(),
                });
            }
            Ok(format!("{provider} resume body"))
        }
    }

    /// Sleeps before answering, to make sequential dispatch observable.
    struct SlowGeneration;

    #[async_trait]
    impl GenerationApi for SlowGeneration {
        async fn generate_resume(
            &self,
            _profile: &UserProfile,
            _job: &JobDescription,
            _provider: Provider,
        ) -> Result<String, BackendError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok("slow body".to_string())
        }
    }

    fn make_profile() -> UserProfile {
        UserProfile {
            id: "p-1".to_string(),
            personal_info: PersonalInfo {
                name: "Ada Example".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+1-555-0100".to_string(),
                location: "Remote".to_string(),
                website: "ada.example.com".to_string(),
                linkedin: "linkedin.com/in/ada".to_string(),
                github: "github.com/ada".to_string(),
            },
            summary: "Systems engineer".to_string(),
            experience: vec![],
            projects: vec![],
            skills: SkillSet {
                technical: vec!["Rust".to_string()],
                soft: vec![],
            },
            education: vec![],
            certifications: vec![],
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

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[tokio::test]
    async fn test_one_draft_per_provider_in_declaration_order() {
        let orchestrator = ResumeOrchestrator::new(Arc::new(FakeGeneration::succeeding()));

        let drafts = orchestrator.generate(&make_profile(), &make_job()).await;

        assert_eq!(drafts.len(), Provider::ALL.len());
        let providers: Vec<Provider> = drafts.iter().map(|d| d.ai_provider).collect();
        assert_eq!(providers, Provider::ALL.to_vec());
        assert_eq!(
            drafts[0].content,
            ResumeContent::PlainText("llama resume body".to_string())
        );
    }

    #[tokio::test]
    async fn test_failure_is_isolated_to_its_provider() {
        init_tracing();
        let orchestrator = ResumeOrchestrator::new(Arc::new(FakeGeneration::failing_for(&[
            Provider::Mistral,
        ])));

        let drafts = orchestrator.generate(&make_profile(), &make_job()).await;

        assert_eq!(drafts.len(), 4);
        let mistral = &drafts[1];
        assert_eq!(mistral.ai_provider, Provider::Mistral);
        assert_eq!(mistral.content, ResumeContent::PlainText(String::new()));
        assert_eq!(mistral.ats_score, Some(0));
        assert_eq!(
            mistral.recommendations,
            vec!["mistral is currently unavailable.".to_string()]
        );

        // Every other provider succeeded with healthy provisional scores.
        for draft in [&drafts[0], &drafts[2], &drafts[3]] {
            assert!(draft.ats_score.unwrap() >= 70);
            assert_ne!(draft.content, ResumeContent::PlainText(String::new()));
        }
    }

    #[tokio::test]
    async fn test_all_providers_failing_still_yields_full_set() {
        let orchestrator =
            ResumeOrchestrator::new(Arc::new(FakeGeneration::failing_for(&Provider::ALL)));

        let drafts = orchestrator.generate(&make_profile(), &make_job()).await;

        assert_eq!(drafts.len(), 4);
        for (draft, provider) in drafts.iter().zip(Provider::ALL) {
            assert_eq!(draft.ai_provider, provider);
            assert_eq!(draft.provisional_sum(), 0);
            assert_eq!(
                draft.recommendations,
                vec![format!("{provider} is currently unavailable.")]
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_calls_run_concurrently() {
        let orchestrator = ResumeOrchestrator::new(Arc::new(SlowGeneration));
        let started = tokio::time::Instant::now();

        let drafts = orchestrator.generate(&make_profile(), &make_job()).await;

        // Four 100ms calls joined in ~100ms, not 400ms.
        assert!(started.elapsed() < Duration::from_millis(200));
        assert_eq!(drafts.len(), 4);
    }
}
