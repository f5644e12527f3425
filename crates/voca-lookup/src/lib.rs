mod http;
mod mock;
mod samples;

use std::sync::Arc;

use voca_config::lookup::{LookupConfig, LookupProvider};
use voca_core::LookupService;

pub use http::HttpLookupService;
pub use mock::MockLookupService;

/// Build the configured provider
pub fn from_config(config: &LookupConfig) -> Arc<dyn LookupService> {
    match config.provider {
        LookupProvider::Mock => Arc::new(MockLookupService::new(config)),
        LookupProvider::Http => Arc::new(HttpLookupService::new(config)),
    }
}
