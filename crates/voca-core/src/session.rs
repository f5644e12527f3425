use voca_types::{LookupRecord, Origin, SessionId};

use crate::error::SessionError;
use crate::preprocess::{DEFAULT_MAX_TERM_CHARS, DefaultPreprocessor, Preprocessor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupState {
    Idle,
    Pending,
    Resolved(LookupRecord),
    Failed(String),
}

impl LookupState {
    fn name(&self) -> &'static str {
        match self {
            LookupState::Idle => "idle",
            LookupState::Pending => "pending",
            LookupState::Resolved(_) => "resolved",
            LookupState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LookupState::Resolved(_) | LookupState::Failed(_))
    }
}

/// One word lookup: `Idle -> Pending -> Resolved | Failed`.
///
/// A new search gets a fresh session; `retry` re-runs the same term inside
/// this one and keeps its origin.
#[derive(Debug, Clone)]
pub struct LookupSession {
    id: SessionId,
    origin: Origin,
    input: String,
    term: String,
    state: LookupState,
    max_chars: usize,
}

impl LookupSession {
    pub fn new(id: SessionId, origin: Origin) -> Self {
        Self {
            id,
            origin,
            input: String::new(),
            term: String::new(),
            state: LookupState::Idle,
            max_chars: DEFAULT_MAX_TERM_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(1);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Exact text the user submitted
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Trimmed, capped term
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == LookupState::Pending
    }

    pub fn record(&self) -> Option<&LookupRecord> {
        match &self.state {
            LookupState::Resolved(record) => Some(record),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            LookupState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Favoriting needs a resolved record
    pub fn can_favorite(&self) -> bool {
        self.record().is_some()
    }

    /// Start a lookup for `input`, returning the stored term.
    pub fn submit(&mut self, input: &str) -> Result<&str, SessionError> {
        if self.is_pending() {
            return Err(SessionError::Busy(self.term.clone()));
        }

        let term = DefaultPreprocessor
            .term(input, self.max_chars)
            .ok_or_else(|| SessionError::InvalidInput("term is empty".to_string()))?;

        tracing::debug!(session = %self.id, "submit '{}'", term);
        self.input = input.to_string();
        self.term = term;
        self.state = LookupState::Pending;

        Ok(&self.term)
    }

    pub fn resolve(&mut self, record: LookupRecord) -> Result<(), SessionError> {
        self.expect_pending("resolve")?;
        self.state = LookupState::Resolved(record);
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), SessionError> {
        self.expect_pending("fail")?;
        self.state = LookupState::Failed(reason.into());
        Ok(())
    }

    /// Re-issue the current term. The previous record is dropped.
    pub fn retry(&mut self) -> Result<&str, SessionError> {
        if !self.state.is_terminal() {
            return Err(SessionError::InvalidTransition {
                action: "retry",
                state: self.state.name(),
            });
        }

        let input = self.input.clone();
        self.submit(&input)
    }

    fn expect_pending(&self, action: &'static str) -> Result<(), SessionError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                state: self.state.name(),
            })
        }
    }
}
