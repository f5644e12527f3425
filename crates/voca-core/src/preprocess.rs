use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_MAX_TERM_CHARS: usize = 50;

/// Turns raw search-box input into a term.
pub trait Preprocessor {
    /// Trim and cap at `max_chars`. `None` when nothing is left.
    fn term(&self, input: &str, max_chars: usize) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Capping can expose trailing whitespace from the middle of the input
        let capped: String = trimmed.chars().take(max_chars).collect();
        Some(capped.trim_end().to_string())
    }

    /// Query sent to the lookup service for a term
    fn query(&self, term: &str) -> String {
        // Unicode normalization (NFKC) folds full-width input
        let text: String = term.nfkc().collect();

        text.replace(['\n', '\r'], " ").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_trims() {
        let term = DefaultPreprocessor.term("  extraordinary \n", DEFAULT_MAX_TERM_CHARS);
        assert_eq!(term.as_deref(), Some("extraordinary"));
    }

    #[test]
    fn test_term_rejects_blank() {
        assert_eq!(DefaultPreprocessor.term("", 50), None);
        assert_eq!(DefaultPreprocessor.term(" \t\n ", 50), None);
    }

    #[test]
    fn test_term_caps_on_chars() {
        let input = "é".repeat(60);
        let term = DefaultPreprocessor.term(&input, 50).unwrap();
        assert_eq!(term.chars().count(), 50);
    }

    #[test]
    fn test_query_folds_full_width() {
        assert_eq!(DefaultPreprocessor.query("ｗｏｒｄ"), "word");
    }
}
