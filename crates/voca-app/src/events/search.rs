use voca_core::route;
use voca_core::{LookupState, LookupTicket, NavigationController, SessionError, Settled};
use voca_types::{AppEvent, NoticeLevel, Route, SessionId};

use crate::context::AppContext;

pub async fn handle_search(
    ctx: &AppContext,
    nav: &mut NavigationController,
    text: &str,
) -> anyhow::Result<()> {
    let ticket = nav.submit_search(text);
    start_lookup(ctx, nav, ticket).await
}

pub async fn handle_select_favorite(
    ctx: &AppContext,
    nav: &mut NavigationController,
    term: &str,
) -> anyhow::Result<()> {
    let ticket = nav.select_favorite(term);
    start_lookup(ctx, nav, ticket).await
}

pub async fn handle_open_link(
    ctx: &AppContext,
    nav: &mut NavigationController,
    link: &str,
) -> anyhow::Result<()> {
    let route = match route::parse(link) {
        Ok(route) => route,
        Err(e) => {
            tracing::debug!("[NAV] {}", e);
            return ctx.notice(NoticeLevel::Warning, e.to_string()).await;
        }
    };

    tracing::debug!("[NAV] Opening {}", route::format(&route));
    let entry = nav.new_entry(route);
    match nav.enter_route(&entry) {
        Ok(Some(ticket)) => start_lookup(ctx, nav, Ok(ticket)).await,
        Ok(None) => show_current(ctx, nav).await,
        Err(e) => start_lookup(ctx, nav, Err(e)).await,
    }
}

pub async fn handle_retry(ctx: &AppContext, nav: &mut NavigationController) -> anyhow::Result<()> {
    let ticket = nav.retry();
    start_lookup(ctx, nav, ticket).await
}

pub async fn handle_back(ctx: &AppContext, nav: &mut NavigationController) -> anyhow::Result<()> {
    let target = nav.back();
    tracing::debug!("[NAV] Back to {}", route::format(&target));
    show_current(ctx, nav).await
}

pub async fn handle_resize(
    ctx: &AppContext,
    nav: &mut NavigationController,
    width: u32,
) -> anyhow::Result<()> {
    let before = nav.layout();
    if nav.resize(width) != before && matches!(nav.route(), Route::Word { .. }) {
        show_current(ctx, nav).await?;
    }
    Ok(())
}

pub async fn handle_settled(
    ctx: &AppContext,
    nav: &mut NavigationController,
    session: SessionId,
    outcome: Result<voca_types::LookupRecord, String>,
) -> anyhow::Result<()> {
    match nav.settle(session, outcome) {
        Ok(Settled::Applied) => show_current(ctx, nav).await,
        Ok(Settled::Discarded) => Ok(()),
        Err(e) => {
            tracing::error!(session = %session, "[LOOKUP] Result rejected: {}", e);
            Ok(())
        }
    }
}

async fn start_lookup(
    ctx: &AppContext,
    nav: &NavigationController,
    ticket: Result<LookupTicket, SessionError>,
) -> anyhow::Result<()> {
    match ticket {
        Ok(ticket) => {
            tracing::info!(session = %ticket.session, "[LOOKUP] '{}'", ticket.term);
            ctx.spawn_lookup(ticket);
            show_current(ctx, nav).await
        }
        Err(SessionError::InvalidInput(_)) => {
            ctx.notice(NoticeLevel::Info, "Enter a word to look up").await
        }
        Err(e @ SessionError::Busy(_)) => ctx.notice(NoticeLevel::Warning, e.to_string()).await,
        Err(e) => {
            tracing::debug!("[LOOKUP] {}", e);
            ctx.notice(NoticeLevel::Warning, e.to_string()).await
        }
    }
}

/// Draw whatever the controller currently shows
pub async fn show_current(ctx: &AppContext, nav: &NavigationController) -> anyhow::Result<()> {
    let chrome = nav.chrome();
    let event = match (nav.route(), nav.session()) {
        (Route::Word { .. }, Some(session)) => match session.state() {
            LookupState::Pending | LookupState::Idle => AppEvent::ShowLoading {
                term: session.term().to_string(),
                chrome,
            },
            LookupState::Resolved(record) => AppEvent::ShowResult {
                record: record.clone(),
                chrome,
            },
            LookupState::Failed(reason) => AppEvent::ShowFailure {
                term: session.term().to_string(),
                reason: reason.clone(),
                chrome,
            },
        },
        (Route::Favorites, _) => {
            ctx.emit(AppEvent::ShowRoute(Route::Favorites)).await?;
            AppEvent::ShowFavorites(ctx.state.store.list())
        }
        (route, _) => AppEvent::ShowRoute(route.clone()),
    };

    ctx.emit(event).await
}
