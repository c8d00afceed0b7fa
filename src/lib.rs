//! Frequency-counting trie with approximate best-match lookup.
//!
//! This crate exposes the trie core so fuzz targets and integration tests can
//! link it without pulling in the interactive front end.

mod distance;
mod search;
mod trie;
mod view;

pub use distance::distance;
pub use trie::{Node, Trie, TrieConfig};
pub use view::{TrieView, WordEntry};

/// Fuzz helper: replays `data` as a stream of insert/remove/lookup operations
/// over a tiny alphabet and panics if the trie disagrees with a plain map.
pub fn fuzz_ops_bytes(data: &[u8]) {
    use std::collections::HashMap;

    const ALPHABET: &[char] = &['a', 'b', 'c', 'A'];

    let case_sensitive = data.first().map_or(true, |b| b & 1 == 0);
    let mut trie = Trie::with_config(TrieConfig { case_sensitive });
    let mut model: HashMap<String, usize> = HashMap::new();
    let fold = |word: String| {
        if case_sensitive {
            word
        } else {
            word.to_lowercase()
        }
    };

    let mut bytes = data.iter().skip(1).copied();
    while let Some(op) = bytes.next() {
        let len = usize::from(op >> 2) % 5;
        let word: String = bytes
            .by_ref()
            .take(len)
            .map(|b| ALPHABET[usize::from(b) % ALPHABET.len()])
            .collect();
        let key = fold(word.clone());
        match op & 3 {
            0 | 1 => {
                let count = trie.insert(&word);
                if !key.is_empty() {
                    *model.entry(key.clone()).or_default() += 1;
                }
                assert_eq!(count, model.get(&key).copied().unwrap_or(0));
            }
            2 => {
                let removed = trie.remove(&word);
                assert_eq!(removed, model.remove(&key).is_some());
            }
            _ => {
                let found = trie.best_match(&word, std::time::Duration::ZERO);
                assert_eq!(found.is_empty(), model.is_empty());
                if !found.is_empty() {
                    assert!(model.contains_key(&found));
                }
            }
        }
        assert_eq!(trie.size(), model.len());
        assert_eq!(trie.frequency(&word), model.get(&key).copied().unwrap_or(0));
    }
}
