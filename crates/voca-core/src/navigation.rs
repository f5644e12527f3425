use voca_types::{Chrome, LayoutClass, LookupRecord, Origin, Route, SessionId};

use crate::error::SessionError;
use crate::preprocess::{DEFAULT_MAX_TERM_CHARS, DefaultPreprocessor, Preprocessor};
use crate::session::LookupSession;

/// Widths below this are compact
pub const COMPACT_BREAKPOINT: u32 = 768;

pub fn layout_class(width: u32) -> LayoutClass {
    classify(width, COMPACT_BREAKPOINT)
}

fn classify(width: u32, breakpoint: u32) -> LayoutClass {
    if width < breakpoint {
        LayoutClass::Compact
    } else {
        LayoutClass::Expanded
    }
}

/// Work order for the lookup collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub session: SessionId,
    pub term: String,
    /// Normalized query to send
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    /// The session was abandoned before its lookup finished
    Discarded,
}

/// Identity of one route entry; re-entering the same entry is a re-render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub key: EntryKey,
    pub route: Route,
}

/// What the shell should draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    pub route: Route,
    pub layout: LayoutClass,
    /// Only the word view carries chrome
    pub chrome: Option<Chrome>,
    pub loading: bool,
    pub input_enabled: bool,
    pub can_favorite: bool,
    pub can_retry: bool,
}

/// Owns the current route and lookup session.
///
/// Back navigation reads the origin of the current session, never a
/// history stack.
pub struct NavigationController {
    route: Route,
    session: Option<LookupSession>,
    layout: LayoutClass,
    breakpoint: u32,
    max_term_chars: usize,
    mounted: Option<EntryKey>,
    next_session: u64,
    next_entry: u64,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self {
            route: Route::Landing,
            session: None,
            layout: LayoutClass::default(),
            breakpoint: COMPACT_BREAKPOINT,
            max_term_chars: DEFAULT_MAX_TERM_CHARS,
            mounted: None,
            next_session: 1,
            next_entry: 1,
        }
    }

    pub fn with_breakpoint(mut self, breakpoint: u32) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    pub fn with_max_term_chars(mut self, max_term_chars: usize) -> Self {
        self.max_term_chars = max_term_chars;
        self
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn session(&self) -> Option<&LookupSession> {
        self.session.as_ref()
    }

    pub fn layout(&self) -> LayoutClass {
        self.layout
    }

    pub fn chrome(&self) -> Chrome {
        Chrome::from(self.layout)
    }

    pub fn is_pending(&self) -> bool {
        self.session.as_ref().is_some_and(LookupSession::is_pending)
    }

    /// Submit from a search box
    pub fn submit_search(&mut self, input: &str) -> Result<LookupTicket, SessionError> {
        self.ensure_idle()?;
        let ticket = self.open(input, Origin::DirectSearch)?;
        self.mounted = Some(self.alloc_entry());
        Ok(ticket)
    }

    /// Open a word from the favorites list
    pub fn select_favorite(&mut self, term: &str) -> Result<LookupTicket, SessionError> {
        self.ensure_idle()?;
        let ticket = self.open(term, Origin::FromFavorites)?;
        self.mounted = Some(self.alloc_entry());
        Ok(ticket)
    }

    /// New entry for a route reached from outside, e.g. a deep link
    pub fn new_entry(&mut self, route: Route) -> RouteEntry {
        RouteEntry {
            key: self.alloc_entry(),
            route,
        }
    }

    /// Mount effect. A word route submits its term once per entry;
    /// entering the same entry again does nothing.
    pub fn enter_route(&mut self, entry: &RouteEntry) -> Result<Option<LookupTicket>, SessionError> {
        if self.mounted == Some(entry.key) {
            tracing::trace!("route entry already mounted, skipping");
            return Ok(None);
        }

        match &entry.route {
            Route::Word { term, origin } => {
                let ticket = self.open(term, *origin)?;
                self.mounted = Some(entry.key);
                Ok(Some(ticket))
            }
            route => {
                self.abandon();
                self.route = route.clone();
                self.mounted = Some(entry.key);
                Ok(None)
            }
        }
    }

    pub fn open_search(&mut self) {
        self.navigate(Route::Search);
    }

    pub fn open_favorites(&mut self) {
        self.navigate(Route::Favorites);
    }

    pub fn open_landing(&mut self) {
        self.navigate(Route::Landing);
    }

    /// Favorites when the session came from there, search otherwise.
    pub fn back(&mut self) -> Route {
        let origin = self
            .session
            .as_ref()
            .map(LookupSession::origin)
            .unwrap_or_default();

        let target = match origin {
            Origin::FromFavorites => Route::Favorites,
            Origin::DirectSearch => Route::Search,
        };

        self.navigate(target.clone());
        target
    }

    pub fn retry(&mut self) -> Result<LookupTicket, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::InvalidTransition {
            action: "retry",
            state: "idle",
        })?;

        let term = session.retry()?.to_string();
        Ok(LookupTicket {
            session: session.id(),
            query: DefaultPreprocessor.query(&term),
            term,
        })
    }

    /// Apply a lookup outcome if `id` is still the current session.
    pub fn settle(
        &mut self,
        id: SessionId,
        outcome: Result<LookupRecord, String>,
    ) -> Result<Settled, SessionError> {
        let Some(session) = self.session.as_mut().filter(|s| s.id() == id) else {
            tracing::debug!(session = %id, "dropping result of abandoned lookup");
            return Ok(Settled::Discarded);
        };

        match outcome {
            Ok(record) => session.resolve(record)?,
            Err(reason) => session.fail(reason)?,
        }

        Ok(Settled::Applied)
    }

    /// Sample the viewport; presentation only.
    pub fn resize(&mut self, width: u32) -> LayoutClass {
        let layout = classify(width, self.breakpoint);
        if layout != self.layout {
            tracing::debug!("layout {:?} -> {:?} at {}px", self.layout, layout, width);
            self.layout = layout;
        }
        layout
    }

    pub fn view(&self) -> ViewSnapshot {
        let on_word = matches!(self.route, Route::Word { .. });
        let session = self.session.as_ref();
        let loading = self.is_pending();

        ViewSnapshot {
            route: self.route.clone(),
            layout: self.layout,
            chrome: on_word.then(|| self.chrome()),
            loading,
            input_enabled: !loading,
            can_favorite: session.is_some_and(LookupSession::can_favorite),
            can_retry: session.is_some_and(|s| s.state().is_terminal()),
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        match &self.session {
            Some(session) if session.is_pending() => {
                Err(SessionError::Busy(session.term().to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Replace the session with a fresh one for `input`. On invalid input
    /// nothing changes.
    fn open(&mut self, input: &str, origin: Origin) -> Result<LookupTicket, SessionError> {
        let id = SessionId(self.next_session);
        let mut session = LookupSession::new(id, origin).with_max_chars(self.max_term_chars);
        let term = session.submit(input)?.to_string();
        self.next_session += 1;

        self.abandon();
        self.route = Route::Word {
            term: term.clone(),
            origin,
        };
        self.session = Some(session);

        Ok(LookupTicket {
            session: id,
            query: DefaultPreprocessor.query(&term),
            term,
        })
    }

    fn navigate(&mut self, route: Route) {
        self.abandon();
        self.route = route;
        self.mounted = Some(self.alloc_entry());
    }

    fn abandon(&mut self) {
        if let Some(session) = self.session.take()
            && session.is_pending()
        {
            tracing::debug!(session = %session.id(), "abandoning pending lookup '{}'", session.term());
        }
    }

    fn alloc_entry(&mut self) -> EntryKey {
        let key = EntryKey(self.next_entry);
        self.next_entry += 1;
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LookupState;

    fn record(term: &str) -> LookupRecord {
        LookupRecord {
            term: term.to_string(),
            pronunciation: String::new(),
            part_of_speech: "noun".to_string(),
            definition: "def".to_string(),
            simple_explanation: String::new(),
            examples: vec![],
            synonyms: Default::default(),
            antonyms: Default::default(),
            etymology: String::new(),
            memory_aid: String::new(),
        }
    }

    #[test]
    fn test_layout_class_threshold() {
        assert_eq!(layout_class(0), LayoutClass::Compact);
        assert_eq!(layout_class(767), LayoutClass::Compact);
        assert_eq!(layout_class(768), LayoutClass::Expanded);
        assert_eq!(layout_class(1920), LayoutClass::Expanded);
    }

    #[test]
    fn test_submit_search_opens_direct_word_route() {
        let mut nav = NavigationController::new();
        let ticket = nav.submit_search(" extraordinary ").unwrap();

        assert_eq!(ticket.term, "extraordinary");
        assert_eq!(nav.route(), &Route::word("extraordinary"));
        assert!(nav.view().loading);
        assert!(!nav.view().input_enabled);
    }

    #[test]
    fn test_blank_search_changes_nothing() {
        let mut nav = NavigationController::new();
        nav.open_search();

        let err = nav.submit_search("   ").unwrap_err();
        assert!(matches!(err, SessionError::InvalidInput(_)));
        assert_eq!(nav.route(), &Route::Search);
        assert!(nav.session().is_none());
    }

    #[test]
    fn test_submit_while_pending_is_busy() {
        let mut nav = NavigationController::new();
        nav.submit_search("first").unwrap();
        assert!(matches!(nav.submit_search("second"), Err(SessionError::Busy(_))));
        assert_eq!(nav.session().unwrap().term(), "first");
    }

    #[test]
    fn test_back_from_favorites_origin() {
        let mut nav = NavigationController::new();
        let entry = nav.new_entry(crate::route::parse("/word/ephemeral?from=favorites").unwrap());
        nav.enter_route(&entry).unwrap();

        assert_eq!(nav.back(), Route::Favorites);
        assert_eq!(nav.route(), &Route::Favorites);
    }

    #[test]
    fn test_back_from_direct_search() {
        let mut nav = NavigationController::new();
        nav.submit_search("ephemeral").unwrap();
        assert_eq!(nav.back(), Route::Search);
    }

    #[test]
    fn test_back_uses_current_session_origin_only() {
        let mut nav = NavigationController::new();
        nav.select_favorite("magnificent").unwrap();
        let id = nav.session().unwrap().id();
        nav.settle(id, Ok(record("magnificent"))).unwrap();

        // Several direct lookups in between do not accumulate history
        for term in ["a", "b", "c"] {
            let ticket = nav.submit_search(term).unwrap();
            nav.settle(ticket.session, Ok(record(term))).unwrap();
        }
        assert_eq!(nav.back(), Route::Search);

        nav.select_favorite("serendipity").unwrap();
        assert_eq!(nav.back(), Route::Favorites);
    }

    #[test]
    fn test_retry_keeps_favorites_origin() {
        let mut nav = NavigationController::new();
        let ticket = nav.select_favorite("ubiquitous").unwrap();
        nav.settle(ticket.session, Err("service unavailable".into()))
            .unwrap();

        let retried = nav.retry().unwrap();
        assert_eq!(retried.term, "ubiquitous");
        nav.settle(retried.session, Ok(record("ubiquitous"))).unwrap();

        assert_eq!(nav.back(), Route::Favorites);
    }

    #[test]
    fn test_late_result_for_abandoned_session_is_dropped() {
        let mut nav = NavigationController::new();
        let stale = nav.submit_search("perseverance").unwrap();
        nav.back();
        let current = nav.submit_search("ephemeral").unwrap();

        let settled = nav.settle(stale.session, Ok(record("perseverance"))).unwrap();
        assert_eq!(settled, Settled::Discarded);

        let session = nav.session().unwrap();
        assert_eq!(session.id(), current.session);
        assert_eq!(session.state(), &LookupState::Pending);
    }

    #[test]
    fn test_double_settle_is_rejected() {
        let mut nav = NavigationController::new();
        let ticket = nav.submit_search("ephemeral").unwrap();
        nav.settle(ticket.session, Ok(record("ephemeral"))).unwrap();

        let err = nav.settle(ticket.session, Err("late".into())).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
        assert!(nav.session().unwrap().record().is_some());
    }

    #[test]
    fn test_deep_link_submits_once_per_entry() {
        let mut nav = NavigationController::new();
        let entry = nav.new_entry(Route::word("serendipity"));

        let first = nav.enter_route(&entry).unwrap();
        assert!(first.is_some());
        assert_eq!(nav.session().unwrap().origin(), Origin::DirectSearch);

        // Re-render of the same entry
        assert_eq!(nav.enter_route(&entry).unwrap(), None);
        assert_eq!(nav.session().unwrap().id(), first.unwrap().session);

        // A new entry for the same link is a new mount
        let again = nav.new_entry(Route::word("serendipity"));
        assert!(nav.enter_route(&again).unwrap().is_some());
    }

    #[test]
    fn test_resize_changes_chrome_not_route() {
        let mut nav = NavigationController::new();
        nav.submit_search("ephemeral").unwrap();

        nav.resize(400);
        let compact = nav.view();
        nav.resize(1280);
        let expanded = nav.view();

        assert_eq!(compact.chrome, Some(Chrome::BottomToolbar));
        assert_eq!(expanded.chrome, Some(Chrome::TopBar));
        assert_eq!(compact.route, expanded.route);
        assert_eq!(compact.loading, expanded.loading);
    }

    #[test]
    fn test_custom_breakpoint() {
        let mut nav = NavigationController::new().with_breakpoint(1024);
        assert_eq!(nav.resize(900), LayoutClass::Compact);
    }

    #[test]
    fn test_favorite_enabled_only_when_resolved() {
        let mut nav = NavigationController::new();
        let ticket = nav.submit_search("ephemeral").unwrap();
        assert!(!nav.view().can_favorite);

        nav.settle(ticket.session, Err("not found".into())).unwrap();
        assert!(!nav.view().can_favorite);
        assert!(nav.view().can_retry);

        let ticket = nav.retry().unwrap();
        nav.settle(ticket.session, Ok(record("ephemeral"))).unwrap();
        assert!(nav.view().can_favorite);
    }
}
