//! Approximate text matcher: the search predicate behind every filter.
//!
//! Two layers:
//!
//! - [`distance`]: Levenshtein edit distance between two strings.
//! - [`fuzzy`]: the tokenized match policy. Substring containment first, then
//!   every query word must be within a length-scaled typo budget of some
//!   field word.
//!
//! Both are pure functions over `&str`. Nothing is cached between calls;
//! [`FuzzyQuery`] lets a caller lowercase and split a query once and reuse it
//! across many fields.

pub mod distance;
pub mod fuzzy;

pub use distance::edit_distance;
pub use fuzzy::{field_words, fuzzy_matches, query_words, typo_threshold, FuzzyQuery};
