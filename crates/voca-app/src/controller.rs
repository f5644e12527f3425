use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use voca_auth::{AuthBackend, AuthSession};
use voca_config::Config;
use voca_core::{LookupService, NavigationController};
use voca_io::clipboard::ClipboardSink;
use voca_types::AppEvent;

use crate::context::AppContext;
use crate::events::{EventState, event_loop};
use crate::io::watcher_io;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(config: &Config) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(config.ui_channel_capacity),
            ui_to_app: kanal::bounded_async(config.app_channel_capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub async fn new(state: Arc<AppState>) -> Self {
        let channels = {
            let config = state.config.read().await;
            ChannelSet::new(&config)
        };

        Self {
            channels,
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Navigation and auth state for a fresh run
    pub async fn event_state<B: AuthBackend>(
        &self,
        backend: B,
        clipboard: Box<dyn ClipboardSink>,
    ) -> EventState<B> {
        let config = self.state.config.read().await;

        let mut nav = NavigationController::new()
            .with_breakpoint(config.ui.compact_breakpoint)
            .with_max_term_chars(config.lookup.max_term_chars);
        nav.resize(config.ui.initial_width);

        let auth = AuthSession::new(self.state.store.clone(), backend, &config.auth);
        EventState::new(nav, auth, clipboard)
    }

    pub fn context(&self, lookup: Arc<dyn LookupService>) -> AppContext {
        AppContext::init(
            self.state.clone(),
            lookup,
            self.channels.app_to_ui.0.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        )
    }

    pub fn spawn_tasks<B: AuthBackend + 'static>(
        &self,
        ctx: AppContext,
        event_state: EventState<B>,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            ctx,
            event_state,
            self.channels.ui_to_app.1.clone(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Stdin
        tasks.spawn(watcher_io(
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
