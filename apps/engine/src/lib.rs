//! Multi-provider resume generation with ATS scoring.
//!
//! The engine is a client of one external backend service and has four
//! moving parts:
//!
//! - [`generation`]: fans one draft request out per provider and always
//!   returns a full per-provider result set, provider failures included;
//! - [`ats`]: evaluates a draft against a posting, with a fingerprint cache
//!   and a local heuristic fallback for backend outages;
//! - [`selector`]: picks the strongest draft out of a generation batch;
//! - [`backend_client`]: the single HTTP boundary. Nothing else talks to
//!   the network.
//!
//! Scores are advisory. Generation-time scores are salted heuristics and a
//! fallback result is keyword matching only; check [`AtsResult::source`]
//! before treating a number as authoritative.

pub mod ats;
pub mod backend_client;
pub mod config;
pub mod errors;
pub mod generation;
pub mod models;
pub mod selector;

pub use ats::engine::{ScoreOptions, ScoringEngine};
pub use ats::result::{AtsResult, ScoreSource};
pub use backend_client::{BackendClient, BackendError};
pub use config::Config;
pub use errors::EngineError;
pub use generation::orchestrator::ResumeOrchestrator;
pub use models::job::JobDescription;
pub use models::profile::UserProfile;
pub use models::resume::{GeneratedResume, Provider, ResumeContent};
pub use models::template::{builtin_templates, ResumeTemplate, TemplateStyle};
pub use selector::best_resume;
