use std::time::Duration;

use async_trait::async_trait;
use voca_config::lookup::LookupConfig;
use voca_core::{LookupError, LookupService};
use voca_types::LookupRecord;

use crate::samples;

/// Serves the built-in sample records after a simulated delay
#[derive(Debug, Clone)]
pub struct MockLookupService {
    latency: Duration,
}

impl MockLookupService {
    pub fn new(config: &LookupConfig) -> Self {
        Self::with_latency(Duration::from_millis(config.latency_ms))
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl LookupService for MockLookupService {
    async fn lookup(&self, term: &str) -> Result<LookupRecord, LookupError> {
        if term.trim().is_empty() || !term.chars().any(char::is_alphabetic) {
            return Err(LookupError::InvalidTerm(term.to_string()));
        }

        tokio::time::sleep(self.latency).await;

        samples::find(term).ok_or_else(|| LookupError::NotFound(term.to_string()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
