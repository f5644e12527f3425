mod backend;
mod error;
mod session_store;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{FavoriteError, StoreError};
pub use session_store::{SessionStore, favorite_from_record};
