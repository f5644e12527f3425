use crate::types::{AuthChrome, AuthRecord, Chrome, FavoriteEntry, LookupRecord, Route, SessionId};

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// A lookup task finished; applied only if `session` is still current
    LookupSettled {
        session: SessionId,
        outcome: Result<LookupRecord, String>,
    },
    /// The auth backend answered sign-in `attempt`
    AuthSettled {
        attempt: u64,
        outcome: Result<AuthRecord, String>,
    },
    ResetSettled {
        email: String,
        outcome: Result<(), String>,
    },
    ShowRoute(Route),
    ShowLoading {
        term: String,
        chrome: Chrome,
    },
    ShowResult {
        record: LookupRecord,
        chrome: Chrome,
    },
    ShowFailure {
        term: String,
        reason: String,
        chrome: Chrome,
    },
    ShowFavorites(Vec<FavoriteEntry>),
    ShowAuth(AuthChrome),
    Notice {
        level: NoticeLevel,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    SearchText(String),
    SelectFavorite(String),
    /// Deep link, e.g. `/word/serendipity?from=favorites`
    OpenLink(String),
    OpenSearch,
    OpenFavorites,
    FilterFavorites(String),
    RemoveFavorite(String),
    Favorite,
    Retry,
    Copy,
    Back,
    Resize(u32),
    Login {
        email: String,
        password: String,
    },
    Register {
        email: String,
        password: String,
        confirm_password: String,
        display_name: String,
    },
    ResetPassword {
        email: String,
    },
    Logout,
    Close,
}
