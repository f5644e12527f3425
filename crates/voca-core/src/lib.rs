pub mod error;
pub mod lookup;
pub mod navigation;
pub mod preprocess;
pub mod render;
pub mod route;
pub mod session;

pub use error::SessionError;
pub use lookup::{LookupError, LookupService};
pub use navigation::{LookupTicket, NavigationController, Settled, ViewSnapshot, layout_class};
pub use render::ResultRenderer;
pub use session::{LookupSession, LookupState};
