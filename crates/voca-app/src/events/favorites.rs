use voca_core::NavigationController;
use voca_store::{FavoriteError, favorite_from_record};
use voca_types::{AppEvent, NoticeLevel};

use crate::context::AppContext;
use crate::events::search::show_current;

/// Save the resolved record of the current session
pub async fn handle_favorite(ctx: &AppContext, nav: &NavigationController) -> anyhow::Result<()> {
    let Some(record) = nav.session().and_then(|s| s.record()) else {
        return ctx
            .notice(NoticeLevel::Info, "Nothing to save until a lookup succeeds")
            .await;
    };

    match ctx.state.store.add(favorite_from_record(record)) {
        Ok(()) => {
            tracing::info!("[FAVORITES] Saved '{}'", record.term);
            ctx.notice(NoticeLevel::Info, format!("Saved '{}'", record.term))
                .await
        }
        Err(FavoriteError::Duplicate(term)) => {
            ctx.notice(NoticeLevel::Info, format!("'{term}' is already saved"))
                .await
        }
        Err(e) => {
            tracing::error!("[FAVORITES] Failed to save '{}': {}", record.term, e);
            ctx.notice(NoticeLevel::Error, format!("Could not save: {e}"))
                .await
        }
    }
}

pub async fn handle_open_favorites(
    ctx: &AppContext,
    nav: &mut NavigationController,
) -> anyhow::Result<()> {
    nav.open_favorites();
    show_current(ctx, nav).await
}

pub async fn handle_filter_favorites(ctx: &AppContext, query: &str) -> anyhow::Result<()> {
    let matches = ctx.state.store.filter(query);
    tracing::debug!("[FAVORITES] '{}' matched {} entries", query, matches.len());
    ctx.emit(AppEvent::ShowFavorites(matches)).await
}

/// Remove by entry id, or by term as typed on the command line
pub async fn handle_remove_favorite(
    ctx: &AppContext,
    nav: &NavigationController,
    key: &str,
) -> anyhow::Result<()> {
    let store = &ctx.state.store;
    let key = key.trim();
    let removed = match store.find(key) {
        Some(entry) => store.remove(&entry.id),
        None => Ok(false),
    };

    match removed {
        Ok(true) => {
            tracing::info!("[FAVORITES] Removed '{}'", key);
            if matches!(nav.route(), voca_types::Route::Favorites) {
                ctx.emit(AppEvent::ShowFavorites(store.list())).await?;
            }
            Ok(())
        }
        Ok(false) => {
            ctx.notice(NoticeLevel::Info, format!("No saved word '{key}'"))
                .await
        }
        Err(e) => {
            tracing::error!("[FAVORITES] Failed to remove '{}': {}", key, e);
            ctx.notice(NoticeLevel::Error, format!("Could not remove: {e}"))
                .await
        }
    }
}
