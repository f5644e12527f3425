//! Route surface exposed to the shell.
//!
//! ```text
//! /                              landing
//! /search                        search entry point
//! /search?q=<term>&from=favorites   favorites link, same as the word route
//! /word/<term>[?from=favorites]  word result
//! /favorites                     favorites list
//! ```
//!
//! The origin tag is the only navigation state carried in a link.

use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;
use voca_types::{Origin, Route};

const BASE: &str = "http://voca.local/";
const FROM_FAVORITES: &str = "favorites";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("Malformed link: {0}")]
    Malformed(String),

    #[error("No route for {0}")]
    NotFound(String),
}

pub fn format(route: &Route) -> String {
    match route {
        Route::Landing => "/".to_string(),
        Route::Search => "/search".to_string(),
        Route::Favorites => "/favorites".to_string(),
        Route::Word { term, origin } => {
            let encoded = utf8_percent_encode(term, NON_ALPHANUMERIC);
            match origin {
                Origin::DirectSearch => format!("/word/{encoded}"),
                Origin::FromFavorites => format!("/word/{encoded}?from={FROM_FAVORITES}"),
            }
        }
    }
}

pub fn parse(link: &str) -> Result<Route, RouteError> {
    let base = Url::parse(BASE).map_err(|e| RouteError::Malformed(e.to_string()))?;
    let url = base
        .join(link.trim())
        .map_err(|e| RouteError::Malformed(format!("{link}: {e}")))?;

    let mut query_term = None;
    let mut origin = Origin::DirectSearch;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "q" if !value.trim().is_empty() => query_term = Some(value.into_owned()),
            "from" if value == FROM_FAVORITES => origin = Origin::FromFavorites,
            _ => {}
        }
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [] => Ok(Route::Landing),
        ["search"] => Ok(match query_term {
            Some(term) => Route::Word { term, origin },
            None => Route::Search,
        }),
        ["favorites"] => Ok(Route::Favorites),
        ["word", raw] => {
            let term = decode_segment(raw);
            if term.trim().is_empty() {
                return Err(RouteError::NotFound(link.to_string()));
            }
            Ok(Route::Word { term, origin })
        }
        _ => Err(RouteError::NotFound(link.to_string())),
    }
}

/// Path segments are percent-encoded only; `+` is a literal plus
fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
