//! Levenshtein edit distance.
//!
//! Unit cost for insertion, deletion and substitution. Symbols are compared
//! as opaque `char`s; no normalization happens here.

/// Result of one dynamic-programming pass over a `(path, query)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Score {
    /// Edit distance between the whole path and the whole query.
    pub distance: usize,
    /// Minimum of the final table row: no string that starts with the path
    /// can be closer to the query than this.
    pub floor: usize,
}

/// Edit distance between `a` and `b`.
///
/// `distance("", x)` is the number of chars in `x`.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    score(&a, &b).distance
}

pub(crate) fn score(a: &[char], b: &[char]) -> Score {
    let blen = b.len();
    if a.is_empty() {
        return Score {
            distance: blen,
            floor: 0,
        };
    }
    if blen == 0 {
        return Score {
            distance: a.len(),
            floor: a.len(),
        };
    }
    let mut prev: Vec<usize> = (0..=blen).collect();
    let mut cur = vec![0; blen + 1];
    for (i, &a_ch) in a.iter().enumerate() {
        cur[0] = i + 1;
        for j in 1..=blen {
            let cost = if a_ch == b[j - 1] { 0 } else { 1 };
            let insert = cur[j - 1] + 1;
            let delete = prev[j] + 1;
            let replace = prev[j - 1] + cost;
            cur[j] = insert.min(delete).min(replace);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    Score {
        distance: prev[blen],
        floor: prev.iter().copied().min().unwrap_or(0),
    }
}
