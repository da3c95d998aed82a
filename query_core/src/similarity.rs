//! Edit-distance helpers for tolerant keyword matching

/// Levenshtein distance between two strings, counted in chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// True when `a` and `b` are within `max` edits of each other
///
/// Skips the distance computation when the length difference alone already
/// exceeds `max`.
pub fn within_distance(a: &str, b: &str, max: usize) -> bool {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a.abs_diff(len_b) > max {
        return false;
    }
    levenshtein(a, b) <= max
}
