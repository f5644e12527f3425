use std::ops::ControlFlow;

use kanal::AsyncReceiver;
use voca_auth::{AuthBackend, AuthSession};
use voca_core::NavigationController;
use voca_io::clipboard::ClipboardSink;
use voca_types::{AppEvent, UiEvent};

use crate::context::AppContext;

pub mod account;
pub mod copy;
pub mod favorites;
pub mod search;

use account::{
    handle_auth_settled, handle_login, handle_logout, handle_register, handle_reset_password,
    handle_reset_settled,
};
use copy::handle_copy;
use favorites::{
    handle_favorite, handle_filter_favorites, handle_open_favorites, handle_remove_favorite,
};
use search::{
    handle_back, handle_open_link, handle_resize, handle_retry, handle_search,
    handle_select_favorite, handle_settled,
};

/// State owned by the event loop. Single writer for navigation and auth.
pub struct EventState<B> {
    pub nav: NavigationController,
    pub auth: AuthSession<B>,
    pub clipboard: Box<dyn ClipboardSink>,
}

impl<B: AuthBackend> EventState<B> {
    pub fn new(nav: NavigationController, auth: AuthSession<B>, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            nav,
            auth,
            clipboard,
        }
    }

    /// Restore the signed-in user and draw the landing page
    pub async fn startup(&mut self, ctx: &AppContext) -> anyhow::Result<()> {
        self.auth.restore();
        ctx.emit(AppEvent::ShowAuth(self.auth.chrome())).await?;
        ctx.emit(AppEvent::ShowRoute(self.nav.route().clone())).await
    }
}

/// App's main loop
pub async fn event_loop<B: AuthBackend>(
    ctx: AppContext,
    mut state: EventState<B>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    state.startup(&ctx).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = ctx.cancel_token().cancelled() => break,
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );
        if handle_events(&ctx, &mut state, event).await?.is_break() {
            break;
        }
    }

    ctx.teardown();
    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

pub async fn handle_events<B: AuthBackend>(
    ctx: &AppContext,
    state: &mut EventState<B>,
    event: AppEvent,
) -> anyhow::Result<ControlFlow<()>> {
    match event {
        AppEvent::UiEvent(event) => return handle_ui_event(ctx, state, event).await,
        AppEvent::LookupSettled { session, outcome } => {
            handle_settled(ctx, &mut state.nav, session, outcome).await?;
        }
        AppEvent::AuthSettled { attempt, outcome } => {
            handle_auth_settled(ctx, &mut state.auth, attempt, outcome).await?;
        }
        AppEvent::ResetSettled { email, outcome } => {
            handle_reset_settled(ctx, &email, outcome).await?;
        }
        // Drawing events only travel app -> ui
        AppEvent::ShowRoute(_)
        | AppEvent::ShowLoading { .. }
        | AppEvent::ShowResult { .. }
        | AppEvent::ShowFailure { .. }
        | AppEvent::ShowFavorites(_)
        | AppEvent::ShowAuth(_)
        | AppEvent::Notice { .. } => {}
    }

    Ok(ControlFlow::Continue(()))
}

async fn handle_ui_event<B: AuthBackend>(
    ctx: &AppContext,
    state: &mut EventState<B>,
    event: UiEvent,
) -> anyhow::Result<ControlFlow<()>> {
    match event {
        UiEvent::SearchText(text) => handle_search(ctx, &mut state.nav, &text).await?,
        UiEvent::SelectFavorite(term) => handle_select_favorite(ctx, &mut state.nav, &term).await?,
        UiEvent::OpenLink(link) => handle_open_link(ctx, &mut state.nav, &link).await?,
        UiEvent::OpenSearch => {
            state.nav.open_search();
            ctx.emit(AppEvent::ShowRoute(state.nav.route().clone())).await?;
        }
        UiEvent::OpenFavorites => handle_open_favorites(ctx, &mut state.nav).await?,
        UiEvent::FilterFavorites(query) => handle_filter_favorites(ctx, &query).await?,
        UiEvent::RemoveFavorite(key) => handle_remove_favorite(ctx, &state.nav, &key).await?,
        UiEvent::Favorite => handle_favorite(ctx, &state.nav).await?,
        UiEvent::Retry => handle_retry(ctx, &mut state.nav).await?,
        UiEvent::Copy => handle_copy(ctx, &state.nav, state.clipboard.as_mut()).await?,
        UiEvent::Back => handle_back(ctx, &mut state.nav).await?,
        UiEvent::Resize(width) => handle_resize(ctx, &mut state.nav, width).await?,
        UiEvent::Login { email, password } => {
            handle_login(ctx, &mut state.auth, &email, &password).await?
        }
        UiEvent::Register {
            email,
            password,
            confirm_password,
            display_name,
        } => {
            handle_register(
                ctx,
                &mut state.auth,
                &email,
                &password,
                &confirm_password,
                &display_name,
            )
            .await?
        }
        UiEvent::ResetPassword { email } => handle_reset_password(ctx, &state.auth, &email).await?,
        UiEvent::Logout => handle_logout(ctx, &mut state.auth).await?,
        UiEvent::Close => {
            tracing::info!("Close requested");
            return Ok(ControlFlow::Break(()));
        }
    }

    Ok(ControlFlow::Continue(()))
}
