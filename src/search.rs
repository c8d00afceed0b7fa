//! Anytime best-first search for the stored word closest to a query.
//!
//! Candidates are popped in order of edit distance to the query, more
//! frequent nodes first among equals. Every candidate also carries a floor,
//! a lower bound on the distance of any word below it, so whole subtrees are
//! skipped once a stored word at least that close is known. The loop stops
//! when the queue runs dry or the time budget is spent, returning the best
//! stored word seen.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use log::debug;

use crate::distance::{self, Score};
use crate::trie::Node;

/// Popped candidates between two clock reads.
const DEADLINE_CHECK_INTERVAL: usize = 1000;

struct Candidate<'a> {
    node: &'a Node,
    path: Vec<char>,
    distance: usize,
    floor: usize,
}

impl<'a> Candidate<'a> {
    fn new(node: &'a Node, path: Vec<char>, score: Score) -> Self {
        Candidate {
            node,
            path,
            distance: score.distance,
            floor: score.floor,
        }
    }

    fn is_word(&self) -> bool {
        self.node.is_word()
    }

    /// Strictly closer, or as close and strictly more frequent.
    fn beats(&self, other: &Candidate<'_>) -> bool {
        self.distance < other.distance
            || (self.distance == other.distance
                && self.node.occurrences() > other.node.occurrences())
    }

    fn into_word(self) -> String {
        self.path.into_iter().collect()
    }
}

// Queue order looks at distance and frequency only. Two different paths that
// agree on both are interchangeable, and the heap may yield either first.
impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.node.occurrences() == other.node.occurrences()
    }
}

impl Eq for Candidate<'_> {}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops the greatest: lowest distance, then highest count.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| self.node.occurrences().cmp(&other.node.occurrences()))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) fn best_match(root: &Node, query: &str, budget: Duration) -> String {
    if root.is_leaf() {
        return String::new();
    }
    let query: Vec<char> = query.chars().collect();
    let start = Instant::now();

    let mut queue = BinaryHeap::new();
    queue.push(Candidate::new(root, Vec::new(), distance::score(&[], &query)));
    let mut best: Option<Candidate<'_>> = None;
    let mut iterations = 0usize;

    while let Some(cur) = queue.pop() {
        let improves = cur.is_word() && best.as_ref().map_or(true, |b| cur.beats(b));
        let ceiling = if improves {
            Some(cur.distance)
        } else {
            best.as_ref().map(|b| b.distance)
        };

        // Anything queued before `best` tightened may now be out of reach.
        if ceiling.map_or(true, |limit| cur.floor <= limit) {
            for (symbol, child) in cur.node.children() {
                let mut path = Vec::with_capacity(cur.path.len() + 1);
                path.extend_from_slice(&cur.path);
                path.push(symbol);
                let score = distance::score(&path, &query);
                if ceiling.map_or(true, |limit| score.floor <= limit) {
                    queue.push(Candidate::new(child, path, score));
                }
            }
        }

        if improves {
            best = Some(cur);
        }

        iterations += 1;
        if iterations % DEADLINE_CHECK_INTERVAL == 0 && start.elapsed() > budget {
            debug!(
                "best_match event=deadline iterations={iterations} pending={} elapsed_ms={}",
                queue.len(),
                start.elapsed().as_millis()
            );
            if best.is_none() {
                best = queue.pop().map(|frontier| settle(frontier, &query));
            }
            return best.map(Candidate::into_word).unwrap_or_default();
        }
    }

    debug!(
        "best_match event=exhausted iterations={iterations} elapsed_ms={}",
        start.elapsed().as_millis()
    );
    best.map(Candidate::into_word).unwrap_or_default()
}

/// Walks down from `candidate` to a stored word, taking the closest child at
/// each step. Every non-root leaf is a stored word, so this always lands on
/// one unless it starts from an empty root.
fn settle<'a>(mut candidate: Candidate<'a>, query: &[char]) -> Candidate<'a> {
    while !candidate.is_word() {
        let next = candidate
            .node
            .children()
            .map(|(symbol, child)| {
                let mut path = candidate.path.clone();
                path.push(symbol);
                let score = distance::score(&path, query);
                Candidate::new(child, path, score)
            })
            .max();
        match next {
            Some(next) => candidate = next,
            None => break,
        }
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::distance;
    use crate::trie::{Trie, TrieConfig};
    use proptest::prelude::*;

    fn trie_of(words: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(word);
        }
        trie
    }

    #[test]
    fn empty_trie_returns_empty_string() {
        let trie = Trie::new();
        assert_eq!(trie.best_match("anything", Duration::MAX), "");
        assert_eq!(trie.best_match("", Duration::ZERO), "");
    }

    #[test]
    fn exact_word_wins() {
        let trie = trie_of(&["bob", "a", "bat", "ass", "za", "z", "z", "Bob"]);
        assert_eq!(trie.best_match("bat", Duration::MAX), "bat");
        assert_eq!(trie.best_match("Bob", Duration::MAX), "Bob");
    }

    #[test]
    fn empty_query_finds_shortest_word() {
        let trie = trie_of(&["a"]);
        assert_eq!(trie.best_match("", Duration::MAX), "a");
    }

    #[test]
    fn frequency_breaks_distance_ties() {
        let trie = trie_of(&["cat", "cot", "cot", "cut"]);
        assert_eq!(trie.best_match("cxt", Duration::MAX), "cot");

        let trie = trie_of(&["bob", "a", "bat", "ass", "za", "z", "z", "Bob"]);
        // "a" and "z" are both one edit from "q"; "z" was inserted twice.
        assert_eq!(trie.best_match("q", Duration::MAX), "z");
    }

    #[test]
    fn reaches_words_whose_prefixes_drift_away() {
        let trie = trie_of(&["xyab"]);
        assert_eq!(trie.best_match("ab", Duration::MAX), "xyab");
    }

    #[test]
    fn typo_correction() {
        let trie = trie_of(&["hello", "help", "helmet", "world", "word"]);
        assert_eq!(trie.best_match("helllo", Duration::MAX), "hello");
        assert_eq!(trie.best_match("wrld", Duration::MAX), "world");
    }

    #[test]
    fn query_is_folded_for_case_insensitive_trie() {
        let mut trie = Trie::with_config(TrieConfig {
            case_sensitive: false,
        });
        trie.insert("Hello");
        trie.insert("yellow");
        assert_eq!(trie.best_match("HELLO", Duration::MAX), "hello");
    }

    #[test]
    fn zero_budget_still_returns_stored_word() {
        let mut trie = Trie::new();
        for i in 0..3000u32 {
            trie.insert(&format!("w{i:05}"));
        }
        let found = trie.best_match("zzzzzzzzzz", Duration::ZERO);
        assert!(trie.contains(&found), "{found:?}");
    }

    #[test]
    fn settle_descends_to_nearest_word() {
        let trie = trie_of(&["abcd", "abxy"]);
        let query: Vec<char> = "abc".chars().collect();
        let seed = Candidate::new(trie.root(), Vec::new(), distance::score(&[], &query));
        let word = settle(seed, &query).into_word();
        assert_eq!(word, "abcd");
    }

    #[test]
    fn candidate_order_prefers_distance_then_frequency() {
        let trie = trie_of(&["aa", "aa", "b"]);
        let root = trie.root();
        let aa = root.child('a').unwrap().child('a').unwrap();
        let b = root.child('b').unwrap();
        let score = |d| Score { distance: d, floor: 0 };

        let near = Candidate::new(b, vec!['b'], score(1));
        let far = Candidate::new(aa, vec!['a', 'a'], score(2));
        assert!(near > far);

        let frequent = Candidate::new(aa, vec!['a', 'a'], score(1));
        assert!(frequent > near);
        assert!(frequent.beats(&near));
        assert!(!near.beats(&frequent));
    }

    fn brute_force(words: &[String], query: &str) -> (usize, usize) {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(word);
        }
        let min = words.iter().map(|w| distance(w, query)).min().unwrap();
        let freq = words
            .iter()
            .filter(|w| distance(w, query) == min)
            .map(|w| trie.frequency(w))
            .max()
            .unwrap();
        (min, freq)
    }

    proptest! {
        #[test]
        fn unbounded_search_is_optimal(
            words in prop::collection::vec("[a-d]{1,6}", 1..24),
            query in "[a-d]{0,7}",
        ) {
            let mut trie = Trie::new();
            for word in &words {
                trie.insert(word);
            }
            let found = trie.best_match(&query, Duration::MAX);
            prop_assert!(trie.contains(&found));
            let (min, freq) = brute_force(&words, &query);
            prop_assert_eq!(distance(&found, &query), min);
            prop_assert_eq!(trie.frequency(&found), freq);
        }

        #[test]
        fn zero_budget_returns_stored_word(
            words in prop::collection::vec("[a-z]{1,8}", 1..32),
            query in "[a-z]{0,8}",
        ) {
            let mut trie = Trie::new();
            for word in &words {
                trie.insert(word);
            }
            let found = trie.best_match(&query, Duration::ZERO);
            prop_assert!(trie.contains(&found));
        }
    }
}
