mod backend;
mod session;
mod validate;

pub use backend::{AuthBackend, MockAuthBackend};
pub use session::{AuthError, AuthSession, AuthState, SignInRequest};
pub use validate::{Field, ValidationError};
