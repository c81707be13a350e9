//! Best-resume selection across a generation batch.

use crate::errors::EngineError;
use crate::models::resume::GeneratedResume;

/// Picks the draft with the highest provisional score sum (ATS score plus
/// keyword match, absent fields as zero).
///
/// Stable left fold: only a strictly greater sum replaces the running best,
/// so ties keep the earliest candidate. An empty batch is an error.
pub fn best_resume(resumes: &[GeneratedResume]) -> Result<&GeneratedResume, EngineError> {
    let (first, rest) = resumes.split_first().ok_or(EngineError::NoCandidates)?;
    Ok(rest.iter().fold(first, |best, candidate| {
        if candidate.provisional_sum() > best.provisional_sum() {
            candidate
        } else {
            best
        }
    }))
}
