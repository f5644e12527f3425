use voca_core::{NavigationController, ResultRenderer};
use voca_io::clipboard::ClipboardSink;
use voca_types::NoticeLevel;

use crate::context::AppContext;

pub async fn handle_copy(
    ctx: &AppContext,
    nav: &NavigationController,
    clipboard: &mut dyn ClipboardSink,
) -> anyhow::Result<()> {
    let Some(record) = nav.session().and_then(|s| s.record()) else {
        return ctx.notice(NoticeLevel::Info, "No result to copy").await;
    };

    let summary = ResultRenderer::clipboard_summary(record);
    match clipboard.copy_text(&summary) {
        Ok(()) => {
            tracing::debug!("[CLIPBOARD] Copied '{}'", record.term);
            ctx.notice(NoticeLevel::Info, "Copied to clipboard").await
        }
        Err(e) => {
            tracing::warn!("[CLIPBOARD] Copy failed: {}", e);
            ctx.notice(NoticeLevel::Warning, format!("Could not copy: {e}"))
                .await
        }
    }
}
