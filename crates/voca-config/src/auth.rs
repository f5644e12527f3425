use std::env;

use serde::{Deserialize, Serialize};

fn default_latency_ms() -> u64 {
    1000
}

fn default_min_password_len() -> usize {
    6
}

fn default_avatar_base_url() -> String {
    "https://ui-avatars.com/api/".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Simulated latency before a mock auth call settles
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            min_password_len: default_min_password_len(),
            avatar_base_url: default_avatar_base_url(),
        }
    }
}

impl AuthConfig {
    pub fn new() -> Self {
        let latency_ms = env::var("VOCA_AUTH_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_latency_ms);

        Self {
            latency_ms,
            ..Self::default()
        }
    }
}
