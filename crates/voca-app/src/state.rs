use std::sync::Arc;

use tokio::sync::RwLock;
use voca_config::Config;
use voca_store::{FileStore, MemoryStore, SessionStore};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub store: Arc<SessionStore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = match &config.store.data_dir {
            Some(dir) => SessionStore::new(FileStore::open(dir)?, &config.store.namespace),
            None => {
                tracing::warn!("No data dir configured, favorites and sign-in last for this run only");
                SessionStore::new(MemoryStore::new(), &config.store.namespace)
            }
        };

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store: Arc::new(store),
        })
    }
}
