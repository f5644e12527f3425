use std::sync::Arc;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use voca_auth::{AuthBackend, SignInRequest};
use voca_core::{LookupService, LookupTicket};
use voca_types::{AppEvent, NoticeLevel};

use crate::state::AppState;

/// Everything an event handler needs, passed explicitly.
///
/// `init` at startup, `teardown` on exit. Teardown cancels every lookup
/// and auth task spawned through this context.
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<AppState>,
    pub lookup: Arc<dyn LookupService>,
    /// Events drawn by the ui
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    /// Events fed back into the event loop (lookup and auth results)
    pub ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
}

impl AppContext {
    pub fn init(
        state: Arc<AppState>,
        lookup: Arc<dyn LookupService>,
        app_to_ui_tx: AsyncSender<AppEvent>,
        ui_to_app_tx: AsyncSender<AppEvent>,
        cancel: CancellationToken,
    ) -> Self {
        tracing::info!("Using '{}' lookup provider", lookup.name());
        Self {
            state,
            lookup,
            app_to_ui_tx,
            ui_to_app_tx,
            cancel,
        }
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub async fn emit(&self, event: AppEvent) -> anyhow::Result<()> {
        self.app_to_ui_tx.send(event).await?;
        Ok(())
    }

    pub async fn notice(&self, level: NoticeLevel, message: impl Into<String>) -> anyhow::Result<()> {
        self.emit(AppEvent::Notice {
            level,
            message: message.into(),
        })
        .await
    }

    /// Run the lookup off the event loop; the outcome comes back tagged
    /// with the ticket's session.
    pub fn spawn_lookup(&self, ticket: LookupTicket) {
        let lookup = self.lookup.clone();
        let tx = self.ui_to_app_tx.clone();
        let cancel = self.cancel.child_token();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                result = lookup.lookup(&ticket.query) => result.map_err(|e| e.to_string()),
                _ = cancel.cancelled() => return,
            };

            if let Err(e) = &outcome {
                tracing::debug!(session = %ticket.session, "[LOOKUP] '{}' failed: {}", ticket.term, e);
            }

            let event = AppEvent::LookupSettled {
                session: ticket.session,
                outcome,
            };
            if let Err(e) = tx.send(event).await {
                tracing::error!("Failed to report lookup result: {}", e);
            }
        });
    }

    /// Run the auth backend off the event loop; the outcome comes back as
    /// `AuthSettled` for the request's attempt.
    pub fn spawn_sign_in<B: AuthBackend>(&self, backend: Arc<B>, request: SignInRequest) {
        let tx = self.ui_to_app_tx.clone();
        let cancel = self.cancel.child_token();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                result = backend.sign_in(&request.email, &request.display_name) => result,
                _ = cancel.cancelled() => return,
            };

            let event = AppEvent::AuthSettled {
                attempt: request.attempt,
                outcome,
            };
            if let Err(e) = tx.send(event).await {
                tracing::error!("Failed to report sign-in result: {}", e);
            }
        });
    }

    pub fn spawn_reset<B: AuthBackend>(&self, backend: Arc<B>, email: String) {
        let tx = self.ui_to_app_tx.clone();
        let cancel = self.cancel.child_token();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                result = backend.send_reset(&email) => result,
                _ = cancel.cancelled() => return,
            };

            if let Err(e) = tx.send(AppEvent::ResetSettled { email, outcome }).await {
                tracing::error!("Failed to report password reset: {}", e);
            }
        });
    }
}
