use anyhow::{Context, Result};

/// Default backend endpoint when `API_BASE` is unset (the local dev server).
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3001";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;
const DEFAULT_ATS_CACHE_CAPACITY: usize = 128;

/// Engine configuration loaded from environment variables.
/// Every variable has a default; the engine runs against a local backend
/// out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the generation/scoring backend.
    pub api_base: String,
    /// Timeout applied to every backend request. The upstream behavior had
    /// no explicit bound; this one is deliberate and tunable.
    pub http_timeout_secs: u64,
    /// Capacity of the ATS result cache (entries, LRU-evicted).
    pub ats_cache_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base: std::env::var("API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a number of seconds")?,
            ats_cache_capacity: std::env::var("ATS_CACHE_CAPACITY")
                .unwrap_or_else(|_| DEFAULT_ATS_CACHE_CAPACITY.to_string())
                .parse::<usize>()
                .context("ATS_CACHE_CAPACITY must be a positive integer")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: DEFAULT_API_BASE.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            ats_cache_capacity: DEFAULT_ATS_CACHE_CAPACITY,
        }
    }
}
