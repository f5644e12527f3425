/// Errors raised by the lookup session state machine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Empty or whitespace-only term; the session is left untouched
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A lookup is already in flight for this session
    #[error("Lookup already pending for '{0}'")]
    Busy(String),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}
