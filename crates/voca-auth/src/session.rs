use std::mem;
use std::sync::Arc;

use voca_config::auth::AuthConfig;
use voca_store::SessionStore;
use voca_types::{AuthChrome, AuthRecord};

use crate::backend::AuthBackend;
use crate::validate::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated(AuthRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Another sign-in is in progress")]
    Busy,

    #[error("Auth service error: {0}")]
    Backend(String),
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "validation",
            AuthError::Busy => "busy",
            AuthError::Backend(_) => "backend",
        }
    }
}

/// A validated sign-in waiting on the backend. `attempt` ties the backend
/// outcome back to the session via [`AuthSession::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    pub attempt: u64,
    pub email: String,
    pub display_name: String,
}

/// Mock sign-in flow. Independent of lookups; only decides which chrome
/// the shell shows.
///
/// A sign-in is split into `begin_*` (validate, enter `Authenticating`) and
/// `finish` (apply the backend outcome), so the backend call can run
/// anywhere. `login`/`register` do both in place.
pub struct AuthSession<B> {
    state: AuthState,
    /// State to fall back to when the pending attempt fails or is abandoned
    fallback: AuthState,
    attempt: u64,
    store: Arc<SessionStore>,
    backend: Arc<B>,
    min_password_len: usize,
}

impl<B> AuthSession<B> {
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&AuthRecord> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn chrome(&self) -> AuthChrome {
        match &self.state {
            AuthState::Authenticated(user) => AuthChrome::SidebarProfile {
                display_name: user.display_name.clone(),
            },
            AuthState::Authenticating => AuthChrome::Authenticating,
            AuthState::Anonymous => AuthChrome::LoginPrompt,
        }
    }

    pub fn backend(&self) -> Arc<B> {
        self.backend.clone()
    }

    /// Pick up a persisted user at startup
    pub fn restore(&mut self) -> Option<&AuthRecord> {
        if let Some(user) = self.store.load() {
            tracing::info!("Restored session for {}", user.display_name);
            self.state = AuthState::Authenticated(user);
        }
        self.user()
    }

    pub fn begin_login(&mut self, email: &str, password: &str) -> Result<SignInRequest, AuthError> {
        let local = validate::email(email)?;
        validate::password(password, self.min_password_len)?;

        self.begin(email, local.to_string())
    }

    pub fn begin_register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
        display_name: &str,
    ) -> Result<SignInRequest, AuthError> {
        validate::email(email)?;
        let display_name = validate::display_name(display_name)?;
        validate::password(password, self.min_password_len)?;
        validate::confirmation(password, confirm_password)?;

        self.begin(email, display_name.to_string())
    }

    /// Apply the backend outcome of `attempt`.
    ///
    /// Returns `None` when that attempt is no longer pending (cancelled,
    /// superseded by a logout); the outcome is dropped.
    pub fn finish(
        &mut self,
        attempt: u64,
        outcome: Result<AuthRecord, String>,
    ) -> Option<Result<AuthRecord, AuthError>> {
        if !self.is_pending(attempt) {
            tracing::debug!("Ignoring outcome of sign-in attempt {}", attempt);
            return None;
        }

        match outcome {
            Ok(user) => {
                if let Err(e) = self.store.save(&user) {
                    tracing::warn!("Failed to persist session: {}", e);
                }
                tracing::info!("Signed in as {}", user.display_name);
                self.fallback = AuthState::Anonymous;
                self.state = AuthState::Authenticated(user.clone());
                Some(Ok(user))
            }
            Err(e) => {
                self.state = mem::replace(&mut self.fallback, AuthState::Anonymous);
                Some(Err(AuthError::Backend(e)))
            }
        }
    }

    /// Abandon `attempt` and go back to the state it started from
    pub fn cancel(&mut self, attempt: u64) {
        if self.is_pending(attempt) {
            tracing::debug!("Sign-in attempt {} abandoned", attempt);
            self.state = mem::replace(&mut self.fallback, AuthState::Anonymous);
        }
    }

    /// Validation half of a password reset
    pub fn check_reset(&self, email: &str) -> Result<(), AuthError> {
        validate::email(email)?;
        Ok(())
    }

    /// Drops any pending sign-in as well
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
        self.fallback = AuthState::Anonymous;
        self.state = AuthState::Anonymous;
    }

    fn begin(&mut self, email: &str, display_name: String) -> Result<SignInRequest, AuthError> {
        if self.state == AuthState::Authenticating {
            return Err(AuthError::Busy);
        }

        self.attempt += 1;
        self.fallback = mem::replace(&mut self.state, AuthState::Authenticating);
        Ok(SignInRequest {
            attempt: self.attempt,
            email: email.trim().to_string(),
            display_name,
        })
    }

    fn is_pending(&self, attempt: u64) -> bool {
        self.state == AuthState::Authenticating && attempt == self.attempt
    }
}

impl<B: AuthBackend> AuthSession<B> {
    pub fn new(store: Arc<SessionStore>, backend: B, config: &AuthConfig) -> Self {
        Self {
            state: AuthState::Anonymous,
            fallback: AuthState::Anonymous,
            attempt: 0,
            store,
            backend: Arc::new(backend),
            min_password_len: config.min_password_len,
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthRecord, AuthError> {
        let request = self.begin_login(email, password)?;
        self.sign_in(request).await
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
        display_name: &str,
    ) -> Result<AuthRecord, AuthError> {
        let request = self.begin_register(email, password, confirm_password, display_name)?;
        self.sign_in(request).await
    }

    /// Mock: validates and reports success, nothing else changes
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.check_reset(email)?;
        self.backend
            .send_reset(email.trim())
            .await
            .map_err(AuthError::Backend)
    }

    async fn sign_in(&mut self, request: SignInRequest) -> Result<AuthRecord, AuthError> {
        let backend = self.backend.clone();
        let mut guard = PendingSignIn {
            session: self,
            attempt: Some(request.attempt),
        };

        let outcome = backend.sign_in(&request.email, &request.display_name).await;

        guard.attempt = None;
        guard
            .session
            .finish(request.attempt, outcome)
            .unwrap_or_else(|| Err(AuthError::Backend("sign-in was abandoned".to_string())))
    }
}

/// Rolls the session back out of `Authenticating` if an in-place sign-in is
/// dropped before the backend answers
struct PendingSignIn<'a, B> {
    session: &'a mut AuthSession<B>,
    attempt: Option<u64>,
}

impl<B> Drop for PendingSignIn<'_, B> {
    fn drop(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            self.session.cancel(attempt);
        }
    }
}
