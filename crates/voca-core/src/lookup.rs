use voca_types::LookupRecord;

/// Remote word-definition retrieval
#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    /// Look up a normalized term
    async fn lookup(&self, term: &str) -> Result<LookupRecord, LookupError>;

    /// Provider name for logs
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("No entry found for '{0}'")]
    NotFound(String),

    #[error("Lookup service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid term: {0}")]
    InvalidTerm(String),
}
