// ATS scoring: remote evaluation with a fingerprint cache, plus the local
// heuristic fallback used when the backend is unreachable.

pub mod cache;
pub mod engine;
pub mod local;
pub mod result;
