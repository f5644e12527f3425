//! End-to-end event flows through the event loop handlers

use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncReceiver;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use voca_auth::{AuthSession, MockAuthBackend};
use voca_config::Config;
use voca_core::{LookupError, LookupService, NavigationController};
use voca_io::clipboard::MemoryClipboard;
use voca_lookup::MockLookupService;
use voca_types::{
    AppEvent, AuthChrome, Chrome, LookupRecord, NoticeLevel, Origin, Route, SessionId, UiEvent,
};

use crate::context::AppContext;
use crate::events::{EventState, handle_events};
use crate::state::AppState;

struct Harness {
    ctx: AppContext,
    state: EventState<MockAuthBackend>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    clipboard: MemoryClipboard,
}

impl Harness {
    async fn new() -> Self {
        Self::with_auth_latency(0).await
    }

    async fn with_auth_latency(latency_ms: u64) -> Self {
        let mut config = Config::default();
        config.auth.latency_ms = latency_ms;

        let (app_to_ui_tx, app_to_ui_rx) = kanal::unbounded_async();
        let (ui_to_app_tx, ui_to_app_rx) = kanal::unbounded_async();

        let backend = MockAuthBackend::new(&config.auth);
        let auth_config = config.auth.clone();
        let app_state = Arc::new(AppState::new(config).unwrap());

        let ctx = AppContext::init(
            app_state.clone(),
            Arc::new(MockLookupService::with_latency(Duration::ZERO)),
            app_to_ui_tx,
            ui_to_app_tx,
            CancellationToken::new(),
        );

        let clipboard = MemoryClipboard::new();
        let auth = AuthSession::new(app_state.store.clone(), backend, &auth_config);
        let mut state = EventState::new(
            NavigationController::new(),
            auth,
            Box::new(clipboard.clone()),
        );
        state.startup(&ctx).await.unwrap();

        let harness = Self {
            ctx,
            state,
            app_to_ui_rx,
            ui_to_app_rx,
            clipboard,
        };
        harness.drain();
        harness
    }

    async fn send(&mut self, event: UiEvent) -> Vec<AppEvent> {
        let flow = handle_events(&self.ctx, &mut self.state, AppEvent::UiEvent(event))
            .await
            .unwrap();
        assert!(flow.is_continue());
        self.drain()
    }

    /// Feed the next finished background task back into the loop
    async fn settle(&mut self) -> Vec<AppEvent> {
        let event = timeout(Duration::from_secs(2), self.ui_to_app_rx.recv())
            .await
            .expect("Timeout - task never finished!")
            .expect("recv failed");

        handle_events(&self.ctx, &mut self.state, event).await.unwrap();
        self.drain()
    }

    async fn lookup(&mut self, term: &str) -> Vec<AppEvent> {
        self.send(UiEvent::SearchText(term.to_string())).await;
        self.settle().await
    }

    fn drain(&self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.app_to_ui_rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn saved_terms(&self) -> Vec<String> {
        self.ctx
            .state
            .store
            .list()
            .into_iter()
            .map(|f| f.term)
            .collect()
    }
}

fn shown_result(events: &[AppEvent]) -> Option<(&str, Chrome)> {
    events.iter().find_map(|e| match e {
        AppEvent::ShowResult { record, chrome } => Some((record.term.as_str(), *chrome)),
        _ => None,
    })
}

fn notice(events: &[AppEvent]) -> Option<(NoticeLevel, &str)> {
    events.iter().find_map(|e| match e {
        AppEvent::Notice { level, message } => Some((*level, message.as_str())),
        _ => None,
    })
}

#[tokio::test]
async fn test_startup_draws_landing_and_login_prompt() {
    let config = Config::default();
    let (app_to_ui_tx, app_to_ui_rx) = kanal::unbounded_async();
    let (ui_to_app_tx, _ui_to_app_rx) = kanal::unbounded_async();
    let app_state = Arc::new(AppState::new(config.clone()).unwrap());
    let ctx = AppContext::init(
        app_state.clone(),
        Arc::new(MockLookupService::with_latency(Duration::ZERO)),
        app_to_ui_tx,
        ui_to_app_tx,
        CancellationToken::new(),
    );

    let auth = AuthSession::new(
        app_state.store.clone(),
        MockAuthBackend::new(&config.auth),
        &config.auth,
    );
    let mut state = EventState::new(
        NavigationController::new(),
        auth,
        Box::new(MemoryClipboard::new()),
    );
    state.startup(&ctx).await.unwrap();

    assert!(matches!(
        app_to_ui_rx.recv().await.unwrap(),
        AppEvent::ShowAuth(AuthChrome::LoginPrompt)
    ));
    assert!(matches!(
        app_to_ui_rx.recv().await.unwrap(),
        AppEvent::ShowRoute(Route::Landing)
    ));
}

#[tokio::test]
async fn test_search_shows_loading_then_result() {
    let mut h = Harness::new().await;

    let events = h.send(UiEvent::SearchText("extraordinary".into())).await;
    assert!(matches!(&events[0], AppEvent::ShowLoading { term, .. } if term == "extraordinary"));
    assert!(!h.state.nav.view().input_enabled);

    let events = h.settle().await;
    assert_eq!(shown_result(&events), Some(("extraordinary", Chrome::TopBar)));
    assert!(h.state.nav.view().can_favorite);
}

#[tokio::test]
async fn test_blank_search_is_ignored() {
    let mut h = Harness::new().await;

    let events = h.send(UiEvent::SearchText("   ".into())).await;
    assert_eq!(notice(&events).map(|n| n.0), Some(NoticeLevel::Info));
    assert_eq!(h.state.nav.route(), &Route::Landing);
    assert!(h.ui_to_app_rx.try_recv().unwrap().is_none());
}

#[tokio::test]
async fn test_submit_while_pending_is_rejected() {
    let mut h = Harness::new().await;
    h.send(UiEvent::SearchText("ephemeral".into())).await;

    let events = h.send(UiEvent::SearchText("magnificent".into())).await;
    assert_eq!(notice(&events).map(|n| n.0), Some(NoticeLevel::Warning));
    assert_eq!(h.state.nav.session().unwrap().term(), "ephemeral");
}

#[tokio::test]
async fn test_unknown_word_fails_and_retries() {
    let mut h = Harness::new().await;

    let events = h.lookup("qwertyuiop").await;
    assert!(matches!(&events[0], AppEvent::ShowFailure { term, .. } if term == "qwertyuiop"));
    assert!(h.state.nav.view().can_retry);

    let events = h.send(UiEvent::Retry).await;
    assert!(matches!(&events[0], AppEvent::ShowLoading { .. }));

    let events = h.settle().await;
    assert!(matches!(&events[0], AppEvent::ShowFailure { .. }));
}

struct UnavailableLookup;

#[async_trait::async_trait]
impl LookupService for UnavailableLookup {
    async fn lookup(&self, _term: &str) -> Result<LookupRecord, LookupError> {
        Err(LookupError::ServiceUnavailable("connection refused".into()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

#[tokio::test]
async fn test_service_error_becomes_failure_with_reason() {
    let mut h = Harness::new().await;
    h.ctx.lookup = Arc::new(UnavailableLookup);

    let events = h.lookup("extraordinary").await;
    assert!(matches!(
        &events[0],
        AppEvent::ShowFailure { reason, .. } if reason.contains("connection refused")
    ));
    assert!(h.state.nav.view().can_retry);
    assert!(h.state.nav.view().input_enabled);
}

#[tokio::test]
async fn test_back_from_favorites_returns_to_list() {
    let mut h = Harness::new().await;
    h.lookup("ephemeral").await;
    h.send(UiEvent::Favorite).await;

    h.send(UiEvent::OpenFavorites).await;
    h.send(UiEvent::SelectFavorite("ephemeral".into())).await;
    h.settle().await;
    assert_eq!(
        h.state.nav.session().unwrap().origin(),
        Origin::FromFavorites
    );

    let events = h.send(UiEvent::Back).await;
    assert!(matches!(events[0], AppEvent::ShowRoute(Route::Favorites)));
    assert!(matches!(&events[1], AppEvent::ShowFavorites(list) if list.len() == 1));
}

#[tokio::test]
async fn test_back_from_direct_search_returns_to_search() {
    let mut h = Harness::new().await;
    h.lookup("magnificent").await;

    let events = h.send(UiEvent::Back).await;
    assert!(matches!(events[0], AppEvent::ShowRoute(Route::Search)));
}

#[tokio::test]
async fn test_late_result_after_leaving_is_dropped() {
    let mut h = Harness::new().await;

    h.send(UiEvent::SearchText("perseverance".into())).await;
    h.send(UiEvent::Back).await;
    h.send(UiEvent::SearchText("ephemeral".into())).await;

    // Both lookups finish; only the current one may draw
    let mut events = h.settle().await;
    events.extend(h.settle().await);

    assert_eq!(shown_result(&events).map(|r| r.0), Some("ephemeral"));
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, AppEvent::ShowResult { record, .. } if record.term == "perseverance"))
    );
}

#[tokio::test]
async fn test_only_last_of_many_concurrent_lookups_draws() {
    let mut h = Harness::new().await;

    for term in ["magnificent", "perseverance", "ubiquitous", "serendipity", "qwertyuiop"] {
        h.send(UiEvent::SearchText(term.into())).await;
        h.send(UiEvent::Back).await;
    }
    h.send(UiEvent::SearchText("ephemeral".into())).await;

    let mut events = Vec::new();
    for _ in 0..6 {
        events.extend(h.settle().await);
    }

    let drawn: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ShowResult { record, .. } => Some(record.term.as_str()),
            AppEvent::ShowFailure { term, .. } => Some(term.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(drawn, ["ephemeral"]);
    assert!(h.ui_to_app_rx.try_recv().unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_in_flight_tasks() {
    let mut h = Harness::with_auth_latency(500).await;
    h.ctx.lookup = Arc::new(MockLookupService::with_latency(Duration::from_millis(500)));

    h.send(UiEvent::SearchText("ephemeral".into())).await;
    h.send(UiEvent::Login {
        email: "learner@example.com".into(),
        password: "secret1".into(),
    })
    .await;
    h.ctx.teardown();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(h.ui_to_app_rx.try_recv().unwrap().is_none());
    assert!(h.state.nav.session().unwrap().record().is_none());
}

#[tokio::test]
async fn test_settle_for_unknown_session_is_ignored() {
    let mut h = Harness::new().await;
    h.lookup("ephemeral").await;

    let stale = AppEvent::LookupSettled {
        session: SessionId(999),
        outcome: Err("late".into()),
    };
    handle_events(&h.ctx, &mut h.state, stale).await.unwrap();

    assert!(h.drain().is_empty());
    assert!(h.state.nav.session().unwrap().record().is_some());
}

#[tokio::test]
async fn test_deep_link_from_favorites() {
    let mut h = Harness::new().await;

    let events = h
        .send(UiEvent::OpenLink("/search?q=serendipity&from=favorites".into()))
        .await;
    assert!(matches!(&events[0], AppEvent::ShowLoading { term, .. } if term == "serendipity"));
    h.settle().await;

    let events = h.send(UiEvent::Back).await;
    assert!(matches!(events[0], AppEvent::ShowRoute(Route::Favorites)));
}

#[tokio::test]
async fn test_bad_link_is_reported() {
    let mut h = Harness::new().await;
    let events = h.send(UiEvent::OpenLink("/nowhere".into())).await;
    assert_eq!(notice(&events).map(|n| n.0), Some(NoticeLevel::Warning));
    assert_eq!(h.state.nav.route(), &Route::Landing);
}

#[tokio::test]
async fn test_duplicate_favorite_is_rejected() {
    let mut h = Harness::new().await;
    h.lookup("extraordinary").await;

    h.send(UiEvent::Favorite).await;
    let events = h.send(UiEvent::Favorite).await;

    assert!(notice(&events).unwrap().1.contains("already saved"));
    assert_eq!(h.saved_terms(), ["extraordinary"]);
}

#[tokio::test]
async fn test_favorite_needs_resolved_result() {
    let mut h = Harness::new().await;
    h.lookup("qwertyuiop").await;

    h.send(UiEvent::Favorite).await;
    assert!(h.saved_terms().is_empty());
}

#[tokio::test]
async fn test_filter_and_remove_favorites() {
    let mut h = Harness::new().await;
    for term in ["magnificent", "ephemeral"] {
        h.lookup(term).await;
        h.send(UiEvent::Favorite).await;
    }

    let events = h.send(UiEvent::FilterFavorites("MAGN".into())).await;
    assert!(matches!(&events[0], AppEvent::ShowFavorites(list) if list.len() == 1));

    h.send(UiEvent::OpenFavorites).await;
    let events = h.send(UiEvent::RemoveFavorite("Magnificent".into())).await;
    assert!(matches!(&events[0], AppEvent::ShowFavorites(list) if list.len() == 1));
    assert_eq!(h.saved_terms(), ["ephemeral"]);

    let events = h.send(UiEvent::RemoveFavorite("magnificent".into())).await;
    assert_eq!(notice(&events).map(|n| n.0), Some(NoticeLevel::Info));
}

#[tokio::test]
async fn test_copy_puts_summary_on_clipboard() {
    let mut h = Harness::new().await;
    h.lookup("ephemeral").await;

    h.send(UiEvent::Copy).await;
    assert_eq!(h.clipboard.last().as_deref(), Some("ephemeral - 短暂的；朝生暮死的"));
}

#[tokio::test]
async fn test_resize_redraws_with_new_chrome() {
    let mut h = Harness::new().await;
    h.lookup("ubiquitous").await;

    let events = h.send(UiEvent::Resize(400)).await;
    assert_eq!(shown_result(&events), Some(("ubiquitous", Chrome::BottomToolbar)));

    // Same layout class, nothing to redraw
    assert!(h.send(UiEvent::Resize(500)).await.is_empty());
}

#[tokio::test]
async fn test_login_and_logout_switch_chrome() {
    let mut h = Harness::new().await;

    let events = h
        .send(UiEvent::Login {
            email: "learner@example.com".into(),
            password: "secret1".into(),
        })
        .await;
    assert!(matches!(events[0], AppEvent::ShowAuth(AuthChrome::Authenticating)));

    let events = h.settle().await;
    assert_eq!(notice(&events), Some((NoticeLevel::Info, "Welcome, learner")));
    assert!(events.iter().any(|e| matches!(
        e,
        AppEvent::ShowAuth(AuthChrome::SidebarProfile { display_name }) if display_name == "learner"
    )));

    let events = h.send(UiEvent::Logout).await;
    assert!(matches!(events[0], AppEvent::ShowAuth(AuthChrome::LoginPrompt)));
}

#[tokio::test(start_paused = true)]
async fn test_lookup_runs_while_signing_in() {
    let mut h = Harness::with_auth_latency(1000).await;

    h.send(UiEvent::Login {
        email: "learner@example.com".into(),
        password: "secret1".into(),
    })
    .await;
    let events = h
        .send(UiEvent::Login {
            email: "other@example.com".into(),
            password: "secret1".into(),
        })
        .await;
    assert_eq!(
        notice(&events),
        Some((NoticeLevel::Warning, "Another sign-in is in progress"))
    );

    let events = h.send(UiEvent::SearchText("ephemeral".into())).await;
    assert!(matches!(events[0], AppEvent::ShowLoading { .. }));

    // The lookup lands first; the sign-in is still pending
    let events = h.settle().await;
    assert_eq!(shown_result(&events).map(|r| r.0), Some("ephemeral"));
    assert_eq!(h.state.auth.chrome(), AuthChrome::Authenticating);

    h.settle().await;
    assert_eq!(h.state.auth.user().map(|u| u.email.as_str()), Some("learner@example.com"));
}

#[tokio::test]
async fn test_reset_password_reports_when_sent() {
    let mut h = Harness::new().await;

    let events = h
        .send(UiEvent::ResetPassword {
            email: "nope".into(),
        })
        .await;
    assert_eq!(notice(&events).map(|n| n.0), Some(NoticeLevel::Warning));

    h.send(UiEvent::ResetPassword {
        email: "learner@example.com".into(),
    })
    .await;
    let events = h.settle().await;
    assert_eq!(
        notice(&events),
        Some((
            NoticeLevel::Info,
            "Password reset instructions sent to learner@example.com"
        ))
    );
}

#[tokio::test]
async fn test_remove_favorite_by_term_ignores_case() {
    let mut h = Harness::new().await;
    h.lookup("ephemeral").await;
    h.send(UiEvent::Favorite).await;

    h.send(UiEvent::RemoveFavorite("  EPHEMERAL ".into())).await;
    assert!(h.saved_terms().is_empty());
}

#[tokio::test]
async fn test_invalid_login_keeps_prompt() {
    let mut h = Harness::new().await;

    let events = h
        .send(UiEvent::Login {
            email: "a@b.com".into(),
            password: "short".into(),
        })
        .await;
    assert_eq!(notice(&events).map(|n| n.0), Some(NoticeLevel::Warning));
    assert!(h.state.auth.user().is_none());
}

#[tokio::test]
async fn test_close_breaks_loop() {
    let mut h = Harness::new().await;
    let flow = handle_events(&h.ctx, &mut h.state, AppEvent::UiEvent(UiEvent::Close))
        .await
        .unwrap();
    assert!(flow.is_break());
}
