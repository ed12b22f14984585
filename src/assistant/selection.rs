//! Parsing the model's comma-separated index list

use std::collections::HashSet;

/// Turn a reply like `"2, 4,9"` into 0-based indices into a list of `len`
/// items.
///
/// Tokens that are not plain digit runs are ignored, as are indices outside
/// `1..=len`. Repeats keep their first position only and the selection is
/// capped at `limit`, in the order the model gave.
pub fn parse_indices(reply: &str, len: usize, limit: usize) -> Vec<usize> {
    let mut seen = HashSet::new();

    reply
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .filter(|&i| i < len)
        .filter(|&i| seen.insert(i))
        .take(limit)
        .collect()
}
