use std::env;

use serde::{Deserialize, Serialize};

fn default_namespace() -> String {
    "ai-voca".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// Prefix of every persisted key
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Directory for the file store; in-memory when unset
    pub data_dir: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        let namespace = env::var("VOCA_STORE_NAMESPACE").unwrap_or_else(|_| default_namespace());
        let data_dir = env::var("VOCA_DATA_DIR").ok();

        Self {
            namespace,
            data_dir,
        }
    }
}
