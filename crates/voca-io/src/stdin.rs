use std::future::Future;

use tokio::io::{AsyncBufReadExt, BufReader};

/// Feed every non-empty stdin line to `on_line` until EOF or until it
/// returns `false`
pub async fn watch_stdin<F, Fut>(mut on_line: F) -> Result<(), anyhow::Error>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = bool>,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() && !on_line(line.to_string()).await {
            return Ok(());
        }
    }

    tracing::debug!("stdin closed");
    Ok(())
}
