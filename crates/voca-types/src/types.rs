use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One usage example, shown in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub primary_text: String,
    pub secondary_text: String,
}

/// Result of a resolved lookup.
///
/// Only ever held by a resolved session, which hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRecord {
    pub term: String,
    pub pronunciation: String,
    pub part_of_speech: String,
    /// Primary-language gloss
    pub definition: String,
    /// Target-language gloss
    pub simple_explanation: String,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub synonyms: BTreeSet<String>,
    #[serde(default)]
    pub antonyms: BTreeSet<String>,
    #[serde(default)]
    pub etymology: String,
    #[serde(default)]
    pub memory_aid: String,
}

/// A saved word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: String,
    pub term: String,
    pub definition: String,
    pub part_of_speech: String,
    /// RFC 3339 timestamp
    pub saved_at: String,
    pub example_count: u32,
}

/// Mock identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRecord {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default, alias = "avatar", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: String,
}

/// Where the navigation to a word view began
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Origin {
    #[default]
    DirectSearch,
    FromFavorites,
}

/// Identity of one lookup session, used to drop late results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Views exposed to the surrounding shell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    Search,
    Word {
        term: String,
        origin: Origin,
    },
    Favorites,
}

impl Route {
    pub fn word(term: impl Into<String>) -> Self {
        Route::Word {
            term: term.into(),
            origin: Origin::DirectSearch,
        }
    }

    pub fn favorite_word(term: impl Into<String>) -> Self {
        Route::Word {
            term: term.into(),
            origin: Origin::FromFavorites,
        }
    }

    pub fn term(&self) -> Option<&str> {
        match self {
            Route::Word { term, .. } => Some(term),
            _ => None,
        }
    }
}

/// Viewport class derived from window width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutClass {
    Compact,
    #[default]
    Expanded,
}

/// Chrome wrapping the word view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chrome {
    TopBar,
    BottomToolbar,
}

impl From<LayoutClass> for Chrome {
    fn from(layout: LayoutClass) -> Self {
        match layout {
            LayoutClass::Compact => Chrome::BottomToolbar,
            LayoutClass::Expanded => Chrome::TopBar,
        }
    }
}

/// Chrome gated by authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChrome {
    SidebarProfile { display_name: String },
    /// Sign-in in flight
    Authenticating,
    LoginPrompt,
}
