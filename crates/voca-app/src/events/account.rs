use voca_auth::{AuthBackend, AuthError, AuthSession, SignInRequest};
use voca_types::{AppEvent, AuthRecord, NoticeLevel};

use crate::context::AppContext;

pub async fn handle_login<B: AuthBackend>(
    ctx: &AppContext,
    auth: &mut AuthSession<B>,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    match auth.begin_login(email, password) {
        Ok(request) => start_sign_in(ctx, auth, request).await,
        Err(e) => auth_failure(ctx, &e).await,
    }
}

pub async fn handle_register<B: AuthBackend>(
    ctx: &AppContext,
    auth: &mut AuthSession<B>,
    email: &str,
    password: &str,
    confirm_password: &str,
    display_name: &str,
) -> anyhow::Result<()> {
    match auth.begin_register(email, password, confirm_password, display_name) {
        Ok(request) => start_sign_in(ctx, auth, request).await,
        Err(e) => auth_failure(ctx, &e).await,
    }
}

/// Apply a finished sign-in. Outcomes of abandoned attempts are dropped.
pub async fn handle_auth_settled<B: AuthBackend>(
    ctx: &AppContext,
    auth: &mut AuthSession<B>,
    attempt: u64,
    outcome: Result<AuthRecord, String>,
) -> anyhow::Result<()> {
    match auth.finish(attempt, outcome) {
        Some(Ok(user)) => {
            ctx.notice(NoticeLevel::Info, format!("Welcome, {}", user.display_name))
                .await?;
        }
        Some(Err(e)) => auth_failure(ctx, &e).await?,
        None => {
            tracing::debug!("[AUTH] Dropped result of sign-in attempt {}", attempt);
            return Ok(());
        }
    }

    ctx.emit(AppEvent::ShowAuth(auth.chrome())).await
}

pub async fn handle_reset_password<B: AuthBackend>(
    ctx: &AppContext,
    auth: &AuthSession<B>,
    email: &str,
) -> anyhow::Result<()> {
    match auth.check_reset(email) {
        Ok(()) => {
            ctx.spawn_reset(auth.backend(), email.trim().to_string());
            Ok(())
        }
        Err(e) => auth_failure(ctx, &e).await,
    }
}

pub async fn handle_reset_settled(
    ctx: &AppContext,
    email: &str,
    outcome: Result<(), String>,
) -> anyhow::Result<()> {
    match outcome {
        Ok(()) => {
            ctx.notice(
                NoticeLevel::Info,
                format!("Password reset instructions sent to {email}"),
            )
            .await
        }
        Err(e) => auth_failure(ctx, &AuthError::Backend(e)).await,
    }
}

pub async fn handle_logout<B: AuthBackend>(
    ctx: &AppContext,
    auth: &mut AuthSession<B>,
) -> anyhow::Result<()> {
    auth.logout();
    tracing::info!("[AUTH] Signed out");
    ctx.emit(AppEvent::ShowAuth(auth.chrome())).await
}

async fn start_sign_in<B: AuthBackend>(
    ctx: &AppContext,
    auth: &AuthSession<B>,
    request: SignInRequest,
) -> anyhow::Result<()> {
    tracing::info!("[AUTH] Signing in {} (attempt {})", request.email, request.attempt);
    ctx.spawn_sign_in(auth.backend(), request);
    ctx.emit(AppEvent::ShowAuth(auth.chrome())).await
}

async fn auth_failure(ctx: &AppContext, error: &AuthError) -> anyhow::Result<()> {
    tracing::debug!("[AUTH] {} error: {}", error.kind(), error);
    let level = match error {
        AuthError::Backend(_) => NoticeLevel::Error,
        AuthError::Validation(_) | AuthError::Busy => NoticeLevel::Warning,
    };
    ctx.notice(level, error.to_string()).await
}
