//! Session cache for ATS results, keyed by a content fingerprint.
//!
//! The cache is an explicit value owned by the scoring engine that gets
//! constructed with it. Bounded capacity with least-recently-used eviction
//! keeps a long session from growing without limit.

use std::collections::HashMap;

use crate::models::job::JobDescription;
use crate::models::resume::GeneratedResume;

use super::result::AtsResult;

/// Cache key derived from resume identity, job title, and the canonical
/// content length, optionally salted by a caller-supplied nonce. Equal
/// inputs always produce the same fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(resume: &GeneratedResume, job: &JobDescription, nonce: Option<u64>) -> Self {
        let len = resume.content.canonical_len();
        let key = match nonce {
            Some(nonce) => format!("{}::{}::{}::{}", resume.id, job.title, len, nonce),
            None => format!("{}::{}::{}", resume.id, job.title, len),
        };
        Fingerprint(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

struct Entry {
    result: AtsResult,
    last_used: u64,
}

/// Bounded map of fingerprint to the last result stored for it. Later
/// non-forced evaluations overwrite earlier ones for the same fingerprint.
pub struct AtsCache {
    entries: HashMap<Fingerprint, Entry>,
    capacity: usize,
    tick: u64,
}

impl AtsCache {
    /// Capacity below 1 is clamped to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            tick: 0,
        }
    }

    /// Returns the cached result and marks the entry recently used.
    pub fn get(&mut self, key: &Fingerprint) -> Option<AtsResult> {
        self.tick += 1;
        let tick = self.tick;
        self.entries.get_mut(key).map(|entry| {
            entry.last_used = tick;
            entry.result.clone()
        })
    }

    /// Read-only lookup; does not affect eviction order.
    pub fn peek(&self, key: &Fingerprint) -> Option<&AtsResult> {
        self.entries.get(key).map(|entry| &entry.result)
    }

    /// Stores a result, evicting the least-recently-used entry when a new
    /// key would exceed capacity. Capacities stay small, so the eviction
    /// scan is linear.
    pub fn insert(&mut self, key: Fingerprint, result: AtsResult) {
        self.tick += 1;
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(
            key,
            Entry {
                result,
                last_used: self.tick,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
