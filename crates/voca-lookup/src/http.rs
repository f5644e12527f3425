use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;
use voca_config::lookup::LookupConfig;
use voca_core::{LookupError, LookupService};
use voca_types::LookupRecord;

/// Client for a remote lookup API answering `GET <api_url>/<term>` with a
/// JSON `LookupRecord`
#[derive(Clone)]
pub struct HttpLookupService {
    client: reqwest::Client,
    api_url: String,
}

impl HttpLookupService {
    pub fn new(config: &LookupConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build lookup client, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            api_url: config.api_url.clone(),
        }
    }

    fn endpoint(&self, term: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| LookupError::ServiceUnavailable(format!("bad API url: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| LookupError::ServiceUnavailable("API url cannot take a path".into()))?
            .pop_if_empty()
            .push(term);

        Ok(url)
    }
}

fn classify(status: StatusCode, term: &str) -> Option<LookupError> {
    match status {
        s if s.is_success() => None,
        StatusCode::NOT_FOUND => Some(LookupError::NotFound(term.to_string())),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Some(LookupError::InvalidTerm(term.to_string()))
        }
        s => Some(LookupError::ServiceUnavailable(format!("HTTP {s}"))),
    }
}

#[async_trait]
impl LookupService for HttpLookupService {
    async fn lookup(&self, term: &str) -> Result<LookupRecord, LookupError> {
        let url = self.endpoint(term)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::ServiceUnavailable(e.to_string()))?;

        if let Some(error) = classify(response.status(), term) {
            return Err(error);
        }

        response.json::<LookupRecord>().await.map_err(|e| {
            LookupError::ServiceUnavailable(format!("Failed to parse response: {e}"))
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}
