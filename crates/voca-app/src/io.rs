use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use voca_types::{AppEvent, NoticeLevel, UiEvent};

use crate::command::{HELP, parse_command};

/// Terminal input. Lines become ui events; EOF closes the app.
pub async fn watcher_io(
    cancel: CancellationToken,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("Starting stdin watcher");

    let tx = ui_to_app_tx.clone();
    tokio::select! {
        result = voca_io::stdin::watch_stdin(move |line| {
            let tx = tx.clone();
            let notices = app_to_ui_tx.clone();
            async move { forward_line(&line, &tx, &notices).await }
        }) => {
            if let Err(e) = result {
                tracing::error!("Stdin watcher error: {}", e);
            }
        }
        _ = cancel.cancelled() => {
            tracing::info!("Stdin watcher stopping");
            return Ok(());
        }
    }

    // Input is gone, nothing else can drive the app
    if let Err(e) = ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await {
        tracing::debug!("Event loop already stopped: {}", e);
    }
    Ok(())
}

/// Returns whether to keep reading
pub(crate) async fn forward_line(
    line: &str,
    ui_to_app_tx: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> bool {
    let reply = match parse_command(line) {
        Ok(Some(event)) => {
            let close = matches!(event, UiEvent::Close);
            if let Err(e) = ui_to_app_tx.send(AppEvent::UiEvent(event)).await {
                tracing::error!("Failed to send input to app: {}", e);
                return false;
            }
            return !close;
        }
        Ok(None) => AppEvent::Notice {
            level: NoticeLevel::Info,
            message: HELP.to_string(),
        },
        Err(e) => AppEvent::Notice {
            level: NoticeLevel::Warning,
            message: e.to_string(),
        },
    };

    app_to_ui_tx.send(reply).await.is_ok()
}
