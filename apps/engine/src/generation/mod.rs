// Resume generation: per-provider drafts assembled by a fan-out
// orchestrator. All network calls go through backend_client; no direct
// HTTP here.

pub mod draft;
pub mod orchestrator;
