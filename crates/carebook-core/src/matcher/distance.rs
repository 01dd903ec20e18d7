//! Levenshtein edit distance.

/// Minimum number of single-character insertions, deletions, or
/// substitutions that turn `a` into `b`.
///
/// Characters are compared as Unicode scalar values and lengths are counted
/// in `char`s. Runs in O(|a|·|b|) time; only two rows of the table are kept.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // prev[i] = distance(a[..i], b[..j-1]); row j = 0 is the insertion column.
    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut curr = vec![0; a.len() + 1];

    for j in 1..=b.len() {
        curr[0] = j;
        for i in 1..=a.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[i] = (curr[i - 1] + 1) // deletion
                .min(prev[i] + 1) // insertion
                .min(prev[i - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[a.len()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
