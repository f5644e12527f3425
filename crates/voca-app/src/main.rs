use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use voca_auth::MockAuthBackend;
use voca_config::Config;
use voca_config::lookup::LookupProvider;
use voca_io::clipboard::SystemClipboard;

pub mod command;
pub mod context;
pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Terminal vocabulary lookup
#[derive(Debug, Parser)]
#[command(name = "voca", version)]
struct Cli {
    /// JSON config file; environment variables are used when absent
    #[arg(short, long, env = "VOCA_CONFIG")]
    config: Option<PathBuf>,

    /// Keep favorites and sign-in under this directory
    #[arg(long)]
    data_dir: Option<String>,

    /// Viewport width used to pick the layout
    #[arg(long)]
    width: Option<u32>,

    /// Look words up through this API instead of the built-in samples
    #[arg(long)]
    api_url: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(dir) = self.data_dir {
            config.store.data_dir = Some(dir);
        }
        if let Some(width) = self.width {
            config.ui.initial_width = width;
        }
        if let Some(url) = self.api_url {
            config.lookup.provider = LookupProvider::Http;
            config.lookup.api_url = url;
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = profile::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    init_tracing(config.log_json);
    tracing::info!("Starting voca");

    let lookup = voca_lookup::from_config(&config.lookup);
    let auth_backend = MockAuthBackend::new(&config.auth);

    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state).await;
    let ctx = controller.context(lookup);
    let event_state = controller
        .event_state(auth_backend, Box::new(SystemClipboard))
        .await;

    let mut tasks = controller.spawn_tasks(ctx, event_state);

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("Task ended with error during shutdown: {}", e);
        }
    }

    // A pending stdin read lives on the blocking pool and cannot be cancelled
    std::process::exit(0)
}
