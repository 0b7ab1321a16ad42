//! Search predicate applied to contact names.
//!
//! The predicate is a case-insensitive substring match. It is tested against the
//! first name, the last name and the `"first last"` full name, so a query that
//! spans the space between both names still matches. An empty predicate matches
//! every contact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Case-insensitive substring predicate.
///
/// Keeps the text as typed for display and a lowercased copy for matching.
///
/// # Examples
///
/// ```
/// use phonebook::domain::SearchPattern;
///
/// let pattern = SearchPattern::new("  BoB ");
/// assert_eq!(pattern.as_str(), "BoB");
/// assert!(pattern.matches_name("Bobby", "Tables"));
/// assert!(SearchPattern::default().matches_name("anyone", "at all"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SearchPattern {
    raw: String,
    needle: String,
}

impl SearchPattern {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    /// Returns the predicate as typed (trimmed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the lowercased form used for matching and cache keys.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns `true` when the predicate matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    #[must_use]
    pub fn matches_name(&self, first_name: &str, last_name: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let first = first_name.to_lowercase();
        let last = last_name.to_lowercase();
        first.contains(&self.needle)
            || last.contains(&self.needle)
            || format!("{first} {last}").contains(&self.needle)
    }

    /// Returns character ranges of `text` matching the predicate.
    ///
    /// Ranges are `(start, end)` character indices with an exclusive end,
    /// non-overlapping and in order. Empty when nothing matches or the
    /// predicate is empty.
    #[must_use]
    pub fn match_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        if self.is_empty() {
            return Vec::new();
        }

        let haystack: Vec<char> = text.to_lowercase().chars().collect();
        let needle: Vec<char> = self.needle.chars().collect();
        // Lowercasing may change the char count for some scripts; fall back to
        // no highlighting rather than mis-aligned ranges.
        if haystack.len() != text.chars().count() || needle.len() > haystack.len() {
            return Vec::new();
        }

        let mut ranges = Vec::new();
        let mut start = 0;
        while start + needle.len() <= haystack.len() {
            if haystack[start..start + needle.len()] == needle[..] {
                ranges.push((start, start + needle.len()));
                start += needle.len();
            } else {
                start += 1;
            }
        }
        ranges
    }
}

impl PartialEq for SearchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.needle == other.needle
    }
}

impl Eq for SearchPattern {}

impl std::hash::Hash for SearchPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.needle.hash(state);
    }
}

impl From<String> for SearchPattern {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for SearchPattern {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<SearchPattern> for String {
    fn from(pattern: SearchPattern) -> Self {
        pattern.raw
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
