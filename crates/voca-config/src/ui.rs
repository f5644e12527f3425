use serde::{Deserialize, Serialize};

fn default_compact_breakpoint() -> u32 {
    768
}

fn default_initial_width() -> u32 {
    1024
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Widths below this are compact
    #[serde(default = "default_compact_breakpoint")]
    pub compact_breakpoint: u32,
    #[serde(default = "default_initial_width")]
    pub initial_width: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            compact_breakpoint: default_compact_breakpoint(),
            initial_width: default_initial_width(),
        }
    }
}
