pub mod events;
pub mod types;

pub use events::{AppEvent, NoticeLevel, UiEvent};
pub use types::*;
