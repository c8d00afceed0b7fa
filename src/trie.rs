//! Frequency-counting prefix tree.
//!
//! The trie owns its node graph outright. Words are sequences of `char`s,
//! optionally folded to lower case before every operation. The empty string
//! plays the role of an absent word: it is never stored and every operation
//! treats it as a no-op.

mod node;

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use log::trace;

pub use node::Node;
use node::ROOT_SYMBOL;

use crate::search;

/// Construction-time settings. Fixed for the lifetime of a [`Trie`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrieConfig {
    /// When false, every argument is folded to lower case before use.
    pub case_sensitive: bool,
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    root: Node,
    // Count of nodes with occurrences > 0, kept in step with every mutation.
    size: usize,
    case_sensitive: bool,
}

impl Trie {
    /// Case-sensitive trie.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Trie {
            root: Node::new(ROOT_SYMBOL),
            size: 0,
            case_sensitive: config.case_sensitive,
        }
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Records one occurrence of `word` and returns its count afterwards.
    /// An empty word is ignored and yields 0.
    pub fn insert(&mut self, word: &str) -> usize {
        let chars = self.symbols(word);
        let count = self.root.insert(&chars);
        if count == 1 {
            self.size += 1;
        }
        trace!("trie event=insert word={word:?} count={count}");
        count
    }

    /// Clears all occurrences of `word` at once.
    ///
    /// Returns true only if the word was stored. Nodes left without a word
    /// and without descendants are pruned bottom-up.
    pub fn remove(&mut self, word: &str) -> bool {
        let chars = self.symbols(word);
        let removed = self.root.remove(&chars);
        if removed {
            self.size -= 1;
        }
        trace!("trie event=remove word={word:?} removed={removed}");
        removed
    }

    pub fn contains(&self, word: &str) -> bool {
        self.frequency(word) > 0
    }

    /// Stored occurrences of `word`, 0 when absent.
    pub fn frequency(&self, word: &str) -> usize {
        self.root
            .lookup(&self.symbols(word))
            .map_or(0, Node::occurrences)
    }

    /// Number of distinct stored words.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Closest stored word to `query` by edit distance, ties going to the
    /// more frequent word.
    ///
    /// The search gives up after roughly `budget` and returns the best word
    /// seen so far. Pass `Duration::MAX` for an exhaustive search. Returns an
    /// empty string only when the trie is empty.
    pub fn best_match(&self, query: &str, budget: Duration) -> String {
        search::best_match(&self.root, &self.fold(query), budget)
    }

    /// Read-only access to the node graph, for projections such as
    /// [`TrieView`](crate::TrieView).
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn fold<'a>(&self, word: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.to_lowercase())
        }
    }

    fn symbols(&self, word: &str) -> Vec<char> {
        self.fold(word).chars().collect()
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug dump: one `path(occurrences)` line per node, depth-first.
impl fmt::Display for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn dump(node: &Node, path: &mut String, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for (symbol, child) in node.children() {
                path.push(symbol);
                writeln!(f, "{}({})", path, child.occurrences())?;
                dump(child, path, f)?;
                path.pop();
            }
            Ok(())
        }
        dump(&self.root, &mut String::new(), f)
    }
}
