//! Bulk dictionary loading.
//!
//! A word is a maximal run of alphanumeric characters or `_`; everything else
//! separates words. Each word found is inserted once per appearance, so
//! running text yields frequency counts.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use log::debug;
use spelltrie::Trie;

use crate::error::{ErrorKind, TrieError, TrieResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadStats {
    pub(crate) words: usize,
    pub(crate) elapsed: Duration,
}

pub(crate) fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .filter(|word| !word.is_empty())
}

pub(crate) fn load_text(trie: &mut Trie, text: &str) -> usize {
    let mut count = 0;
    for word in words(text) {
        trie.insert(word);
        count += 1;
    }
    count
}

pub(crate) fn load_file(trie: &mut Trie, path: &Path) -> TrieResult<LoadStats> {
    let start = Instant::now();
    let text = fs::read_to_string(path).map_err(|err| {
        TrieError::new(ErrorKind::Load, format!("cannot read {}", path.display()))
            .with_context(err.to_string())
    })?;
    let words = load_text(trie, &text);
    let elapsed = start.elapsed();
    debug!(
        "dictionary event=load path={} words={words} distinct={} elapsed_ms={}",
        path.display(),
        trie.size(),
        elapsed.as_millis()
    );
    Ok(LoadStats { words, elapsed })
}
