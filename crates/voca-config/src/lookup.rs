use std::env;

use serde::{Deserialize, Serialize};

fn default_provider() -> LookupProvider {
    LookupProvider::Mock
}

fn default_api_url() -> String {
    "http://localhost:8787/api/words".to_string()
}

fn default_latency_ms() -> u64 {
    1500
}

fn default_max_term_chars() -> usize {
    50
}

fn default_timeout_seconds() -> u64 {
    10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupProvider {
    /// Built-in sample records
    Mock,
    /// Remote lookup API
    Http,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    #[serde(default = "default_provider")]
    pub provider: LookupProvider,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Simulated latency of the mock provider
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default = "default_max_term_chars")]
    pub max_term_chars: usize,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: default_api_url(),
            latency_ms: default_latency_ms(),
            max_term_chars: default_max_term_chars(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl LookupConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        let provider = match env::var("VOCA_LOOKUP_PROVIDER").as_deref() {
            Ok("http") => LookupProvider::Http,
            Ok("mock") => LookupProvider::Mock,
            _ => defaults.provider,
        };

        let api_url = env::var("VOCA_LOOKUP_URL").unwrap_or(defaults.api_url);

        let latency_ms = env::var("VOCA_LOOKUP_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.latency_ms);

        let timeout_seconds = env::var("VOCA_LOOKUP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_seconds);

        Self {
            provider,
            api_url,
            latency_ms,
            timeout_seconds,
            ..defaults
        }
    }
}
