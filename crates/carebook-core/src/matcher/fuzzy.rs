//! Tokenized fuzzy matching with a length-scaled typo budget.
//!
//! Decision procedure for `fuzzy_matches(query, field)`:
//!
//! 1. An empty query matches everything.
//! 2. If the lowercased field contains the lowercased query, it matches.
//! 3. Otherwise every query word must be within [`typo_threshold`] edits of
//!    at least one field word (AND across query words, OR across field words,
//!    word order ignored).
//!
//! Query words are split on the ASCII space only. Field words are split on
//! runs of whitespace, `,`, `.` and `-`. Apostrophes are not separators, so
//! `O'Brien` stays a single word.

use super::distance::edit_distance;

/// Maximum edit distance tolerated for a query word of `len` characters.
///
/// | length | edits |
/// |--------|-------|
/// | ≤ 3    | 0     |
/// | 4–7    | 1     |
/// | ≥ 8    | 2     |
pub fn typo_threshold(len: usize) -> usize {
    match len {
        0..=3 => 0,
        4..=7 => 1,
        _ => 2,
    }
}

/// Split an already-lowercased query into words.
pub fn query_words(query: &str) -> impl Iterator<Item = &str> {
    query.split(' ').filter(|w| !w.is_empty())
}

/// Split an already-lowercased field into words.
pub fn field_words(field: &str) -> impl Iterator<Item = &str> {
    field
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '-'))
        .filter(|w| !w.is_empty())
}

/// Does `field` match `query`, tolerating small typos?
///
/// Shorthand for `FuzzyQuery::new(query).matches(field)`. Prefer building a
/// [`FuzzyQuery`] once when testing the same query against many fields.
pub fn fuzzy_matches(query: &str, field: &str) -> bool {
    FuzzyQuery::new(query).matches(field)
}

// ---------------------------------------------------------------------------
// FuzzyQuery
// ---------------------------------------------------------------------------

/// A query lowercased and split once, reusable across many fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyQuery {
    lowered: String,
    /// `(word, threshold)` pairs, thresholds precomputed from char length.
    words: Vec<(String, usize)>,
}

impl FuzzyQuery {
    pub fn new(query: &str) -> Self {
        let lowered = query.to_lowercase();
        let words = query_words(&lowered)
            .map(|w| (w.to_string(), typo_threshold(w.chars().count())))
            .collect();
        Self { lowered, words }
    }

    /// True for the empty query, which matches every field.
    pub fn is_empty(&self) -> bool {
        self.lowered.is_empty()
    }

    /// The lowercased query text.
    pub fn as_str(&self) -> &str {
        &self.lowered
    }

    pub fn matches(&self, field: &str) -> bool {
        if self.lowered.is_empty() {
            return true;
        }

        let field = field.to_lowercase();
        if field.contains(self.lowered.as_str()) {
            return true;
        }

        let field_words: Vec<&str> = field_words(&field).collect();
        self.words.iter().all(|(word, threshold)| {
            field_words
                .iter()
                .any(|fw| edit_distance(word, fw) <= *threshold)
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
