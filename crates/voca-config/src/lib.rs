use std::env;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::lookup::LookupConfig;
use self::store::StoreConfig;
use self::ui::UiConfig;

pub mod auth;
pub mod lookup;
pub mod store;
pub mod ui;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
    pub ui: UiConfig,

    /// Capacity of the app -> ui channel
    pub ui_channel_capacity: usize,
    /// Capacity of the ui -> app channel
    pub app_channel_capacity: usize,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            auth: AuthConfig::default(),
            store: StoreConfig::default(),
            ui: UiConfig::default(),

            ui_channel_capacity: 256,
            app_channel_capacity: 64,
            log_json: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let defaults = Self::default();

        let ui_channel_capacity = env::var("VOCA_UI_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.ui_channel_capacity);

        let app_channel_capacity = env::var("VOCA_APP_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.app_channel_capacity);

        let log_json = env::var("VOCA_LOG_JSON")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Config {
            lookup: LookupConfig::new(),
            auth: AuthConfig::new(),
            store: StoreConfig::new(),
            ui: UiConfig::default(),

            ui_channel_capacity,
            app_channel_capacity,
            log_json,
        }
    }
}
