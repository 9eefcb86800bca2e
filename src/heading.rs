//! Heading pattern recognizer for two-level numbered outlines.
//!
//! Classifies a single trimmed line as a level-1 heading (`5  Title`),
//! a level-2 heading (`5.1  Title`) or neither. Stateless and
//! side-effect-free: it never looks at surrounding lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ExtractError, Result};

/// Default level-1 pattern: digits, tab/space separators, title.
///
/// A dotted identifier such as `5.1` cannot match: the character after
/// the digits must be a tab or space, so no lookahead is needed to
/// reject the dot.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static L1_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<id>\d+)[\t ]+(?P<title>.+)$").expect("valid regex"));

/// Default level-2 pattern: `digits.digits`, separators, title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static L2_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<id>\d+\.\d+)[\t ]+(?P<title>.+)$").expect("valid regex"));

/// Result of classifying a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingMatch {
    /// The line is not a recognized heading.
    NoMatch,

    /// Level-1 heading (e.g. `5  Organizational controls`).
    Level1 { id: String, title: String },

    /// Level-2 heading (e.g. `5.1  Policies`).
    Level2 { id: String, title: String },
}

/// Compiled heading matchers, with optional caller-supplied overrides.
///
/// Override patterns follow the same named-capture contract as the
/// defaults: a group `id` (must capture non-empty text for the match
/// to count) and a group `title`.
#[derive(Debug, Clone)]
pub struct HeadingRecognizer {
    l1: Regex,
    l2: Regex,
}

impl HeadingRecognizer {
    /// Create a recognizer with the default patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            l1: L1_DEFAULT.clone(),
            l2: L2_DEFAULT.clone(),
        }
    }

    /// Create a recognizer with optional pattern overrides.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidPattern`] if an override fails
    /// to compile.
    pub fn with_patterns(l1_pattern: Option<&str>, l2_pattern: Option<&str>) -> Result<Self> {
        let l1 = match l1_pattern {
            Some(pattern) => compile_override(pattern)?,
            None => L1_DEFAULT.clone(),
        };
        let l2 = match l2_pattern {
            Some(pattern) => compile_override(pattern)?,
            None => L2_DEFAULT.clone(),
        };
        Ok(Self { l1, l2 })
    }

    /// Effective level-1 pattern source, for provenance metadata.
    #[must_use]
    pub fn l1_pattern(&self) -> &str {
        self.l1.as_str()
    }

    /// Effective level-2 pattern source, for provenance metadata.
    #[must_use]
    pub fn l2_pattern(&self) -> &str {
        self.l2.as_str()
    }

    /// Match a trimmed line against the level-1 pattern.
    #[must_use]
    pub fn match_level1(&self, trimmed: &str) -> Option<(String, String)> {
        capture_heading(&self.l1, trimmed)
    }

    /// Match a trimmed line against the level-2 pattern.
    #[must_use]
    pub fn match_level2(&self, trimmed: &str) -> Option<(String, String)> {
        capture_heading(&self.l2, trimmed)
    }

    /// Classify a trimmed line.
    ///
    /// Level-2 is tried first: the patterns are independent, and a
    /// dotted identifier must not be claimed by a permissive level-1
    /// override.
    #[must_use]
    pub fn classify(&self, trimmed: &str) -> HeadingMatch {
        if let Some((id, title)) = self.match_level2(trimmed) {
            return HeadingMatch::Level2 { id, title };
        }
        if let Some((id, title)) = self.match_level1(trimmed) {
            return HeadingMatch::Level1 { id, title };
        }
        HeadingMatch::NoMatch
    }
}

impl Default for HeadingRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_override(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ExtractError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Extract `(id, title)` from a match. A match without a non-empty
/// `id` capture is treated as no match.
fn capture_heading(re: &Regex, trimmed: &str) -> Option<(String, String)> {
    let caps = re.captures(trimmed)?;
    let id = caps.name("id")?.as_str();
    if id.is_empty() {
        return None;
    }
    let title = caps
        .name("title")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    Some((id.to_string(), title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level1_match() {
        let recognizer = HeadingRecognizer::new();
        assert_eq!(
            recognizer.classify("5\tOrganizational controls"),
            HeadingMatch::Level1 {
                id: "5".to_string(),
                title: "Organizational controls".to_string()
            }
        );
    }

    #[test]
    fn test_level1_space_separated() {
        let recognizer = HeadingRecognizer::new();
        assert_eq!(
            recognizer.classify("6   People controls"),
            HeadingMatch::Level1 {
                id: "6".to_string(),
                title: "People controls".to_string()
            }
        );
    }

    #[test]
    fn test_level2_match() {
        let recognizer = HeadingRecognizer::new();
        assert_eq!(
            recognizer.classify("5.1\tPolicies for information security"),
            HeadingMatch::Level2 {
                id: "5.1".to_string(),
                title: "Policies for information security".to_string()
            }
        );
    }

    #[test]
    fn test_dotted_id_never_level1() {
        let recognizer = HeadingRecognizer::new();
        // "5." followed by more digits must not be claimed by level-1
        assert!(recognizer.match_level1("5.1\tPolicies").is_none());
    }

    #[test]
    fn test_plain_text_no_match() {
        let recognizer = HeadingRecognizer::new();
        assert_eq!(recognizer.classify("intro text"), HeadingMatch::NoMatch);
        assert_eq!(recognizer.classify(""), HeadingMatch::NoMatch);
        // Identifier without a title remainder is not a heading
        assert_eq!(recognizer.classify("5"), HeadingMatch::NoMatch);
    }

    #[test]
    fn test_deep_id_no_match() {
        let recognizer = HeadingRecognizer::new();
        // Three components are outside the two-level scheme
        assert_eq!(
            recognizer.classify("5.1.1\tDeep heading"),
            HeadingMatch::NoMatch
        );
    }

    #[test]
    fn test_override_patterns() {
        let recognizer = HeadingRecognizer::with_patterns(
            Some(r"^A\.(?P<id>\d+)\s+(?P<title>.+)$"),
            Some(r"^A\.(?P<id>\d+\.\d+)\s+(?P<title>.+)$"),
        )
        .unwrap();

        assert_eq!(
            recognizer.classify("A.5 Annex controls"),
            HeadingMatch::Level1 {
                id: "5".to_string(),
                title: "Annex controls".to_string()
            }
        );
        assert_eq!(
            recognizer.classify("A.5.1 Annex policies"),
            HeadingMatch::Level2 {
                id: "5.1".to_string(),
                title: "Annex policies".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = HeadingRecognizer::with_patterns(Some("("), None);
        assert!(matches!(
            result,
            Err(ExtractError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_empty_id_capture_is_no_match() {
        // A pattern whose id group can capture nothing yields no match
        let recognizer =
            HeadingRecognizer::with_patterns(Some(r"^(?P<id>\d*)(?P<title>.*)$"), None).unwrap();
        assert!(recognizer.match_level1("no digits here").is_none());
    }

    #[test]
    fn test_pattern_provenance() {
        let recognizer = HeadingRecognizer::new();
        assert!(recognizer.l1_pattern().contains("?P<id>"));
        assert!(recognizer.l2_pattern().contains(r"\d+\.\d+"));
    }
}
