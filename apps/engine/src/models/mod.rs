// Data model: input snapshots (profile, job), generated drafts, and the
// template catalog. Wire names follow the frontend's camelCase contract.

pub mod job;
pub mod profile;
pub mod resume;
pub mod template;
