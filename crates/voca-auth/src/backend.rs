use std::time::Duration;

use url::form_urlencoded;
use voca_config::auth::AuthConfig;
use voca_types::AuthRecord;

/// Remote side of authentication
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync + 'static {
    /// Issue an identity for an already validated email and display name
    async fn sign_in(&self, email: &str, display_name: &str) -> Result<AuthRecord, String>;

    async fn send_reset(&self, email: &str) -> Result<(), String>;
}

/// Settles every call after a fixed latency; no network involved
#[derive(Debug, Clone)]
pub struct MockAuthBackend {
    latency: Duration,
    avatar_base_url: String,
}

impl MockAuthBackend {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            avatar_base_url: config.avatar_base_url.clone(),
        }
    }

    fn avatar_url(&self, display_name: &str) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("name", display_name)
            .append_pair("background", "6366f1")
            .append_pair("color", "fff")
            .finish();
        format!("{}?{}", self.avatar_base_url, query)
    }
}

#[async_trait::async_trait]
impl AuthBackend for MockAuthBackend {
    async fn sign_in(&self, email: &str, display_name: &str) -> Result<AuthRecord, String> {
        tokio::time::sleep(self.latency).await;

        Ok(AuthRecord {
            id: format!("user_{}", uuid::Uuid::new_v4().simple()),
            email: email.trim().to_string(),
            display_name: display_name.to_string(),
            avatar_url: Some(self.avatar_url(display_name)),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn send_reset(&self, email: &str) -> Result<(), String> {
        tokio::time::sleep(self.latency).await;
        tracing::info!("Password reset mail sent to {}", email.trim());
        Ok(())
    }
}
