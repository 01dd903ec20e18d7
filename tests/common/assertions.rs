//! Domain-specific assertion macros for carebook harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! record property that was violated.

/// Assert that a result list holds exactly these diagnoses, in order.
///
/// ```rust
/// assert_diagnoses!(store.query(&filter), ["Acute Bronchitis"]);
/// ```
#[macro_export]
macro_rules! assert_diagnoses {
    ($records:expr, [$($d:expr),* $(,)?]) => {{
        let actual: Vec<String> = $records.iter().map(|r| r.diagnosis.clone()).collect();
        let expected: Vec<String> = vec![$($d.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "diagnoses differ");
    }};
}

/// Assert that records are ordered by date, newest first (`desc`) or oldest
/// first (`asc`).
#[macro_export]
macro_rules! assert_date_sorted {
    ($records:expr, desc) => {{
        for pair in $records.windows(2) {
            assert!(
                pair[0].date >= pair[1].date,
                "assert_date_sorted!(desc) failed: {} ({}) before {} ({})",
                pair[0].id, pair[0].date, pair[1].id, pair[1].date
            );
        }
    }};
    ($records:expr, asc) => {{
        for pair in $records.windows(2) {
            assert!(
                pair[0].date <= pair[1].date,
                "assert_date_sorted!(asc) failed: {} ({}) before {} ({})",
                pair[0].id, pair[0].date, pair[1].id, pair[1].date
            );
        }
    }};
}
