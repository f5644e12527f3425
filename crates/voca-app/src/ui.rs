use std::fmt::Write;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use voca_core::{ResultRenderer, route};
use voca_types::{AppEvent, AuthChrome, Chrome, FavoriteEntry, NoticeLevel, Route};

/// Draws app events on stdout until the channel closes
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let event = tokio::select! {
            event = app_to_ui_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
            _ = cancel.cancelled() => break,
        };

        if let Some(text) = format_event(&event) {
            println!("{text}");
        }
    }

    tracing::info!("[UI] Stopped");
    Ok(())
}

pub fn format_event(event: &AppEvent) -> Option<String> {
    let text = match event {
        AppEvent::ShowRoute(route) => format_route(route),
        AppEvent::ShowLoading { term, chrome } => {
            with_chrome(*chrome, format!("Looking up '{term}'..."), false)
        }
        AppEvent::ShowResult { record, chrome } => ResultRenderer::render(record, *chrome),
        AppEvent::ShowFailure {
            term,
            reason,
            chrome,
        } => with_chrome(
            *chrome,
            format!("Could not look up '{term}': {reason}\n:retry to try again"),
            true,
        ),
        AppEvent::ShowFavorites(favorites) => format_favorites(favorites),
        AppEvent::ShowAuth(AuthChrome::SidebarProfile { display_name }) => {
            format!("Signed in as {display_name}")
        }
        AppEvent::ShowAuth(AuthChrome::Authenticating) => "Signing in...".to_string(),
        AppEvent::ShowAuth(AuthChrome::LoginPrompt) => {
            "Not signed in. :login <email> <password>".to_string()
        }
        AppEvent::Notice { level, message } => {
            let tag = match level {
                NoticeLevel::Info => "info",
                NoticeLevel::Warning => "warn",
                NoticeLevel::Error => "error",
            };
            format!("[{tag}] {message}")
        }
        AppEvent::UiEvent(_)
        | AppEvent::LookupSettled { .. }
        | AppEvent::AuthSettled { .. }
        | AppEvent::ResetSettled { .. } => return None,
    };

    Some(text)
}

fn format_route(route: &Route) -> String {
    match route {
        Route::Landing => "AI Voca. Type a word to look up, :help for commands".to_string(),
        Route::Search => "Search. Type a word".to_string(),
        Route::Favorites => "Saved words".to_string(),
        Route::Word { .. } => route::format(route),
    }
}

fn with_chrome(chrome: Chrome, body: String, retry: bool) -> String {
    let actions = if retry { "  [retry]" } else { "" };
    match chrome {
        Chrome::TopBar => format!("[< back]{actions}\n{body}"),
        Chrome::BottomToolbar => format!("{body}\n[< back]{actions}"),
    }
}

fn format_favorites(favorites: &[FavoriteEntry]) -> String {
    if favorites.is_empty() {
        return "  (no saved words)".to_string();
    }

    let mut out = String::new();
    for favorite in favorites {
        let _ = writeln!(
            out,
            "  {}  ({})  {}  [{} examples, saved {}]",
            favorite.term,
            favorite.part_of_speech,
            favorite.definition,
            favorite.example_count,
            favorite.saved_at.get(..10).unwrap_or(favorite.saved_at.as_str()),
        );
    }
    out.truncate(out.trim_end().len());
    out
}
