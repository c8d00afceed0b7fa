//! Read-only projections of a trie for display.
//!
//! Everything here goes through the public traversal surface of [`Node`]
//! (`symbol`, `occurrences`, `children`), so a view can never mutate the
//! trie it borrows.

use crate::trie::{Node, Trie};

/// A stored word and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub occurrences: usize,
}

pub struct TrieView<'a> {
    trie: &'a Trie,
}

impl<'a> TrieView<'a> {
    pub fn new(trie: &'a Trie) -> Self {
        TrieView { trie }
    }

    /// All stored words in symbol order.
    pub fn words(&self) -> Vec<WordEntry> {
        let mut out = Vec::with_capacity(self.trie.size());
        collect(self.trie.root(), &mut String::new(), &mut out);
        out
    }

    /// Stored words starting with `prefix`, folded like any other argument.
    pub fn completions(&self, prefix: &str) -> Vec<WordEntry> {
        let prefix = self.trie.fold(prefix);
        let mut node = self.trie.root();
        for symbol in prefix.chars() {
            match node.child(symbol) {
                Some(child) => node = child,
                None => return Vec::new(),
            }
        }
        let mut path = prefix.into_owned();
        let mut out = Vec::new();
        if node.is_word() {
            out.push(WordEntry {
                word: path.clone(),
                occurrences: node.occurrences(),
            });
        }
        collect(node, &mut path, &mut out);
        out
    }

    /// Indented tree, one `symbol (occurrences)` line per node.
    pub fn render(&self) -> String {
        let root = self.trie.root();
        if root.is_leaf() {
            return "(empty)\n".to_string();
        }
        let mut out = String::new();
        render_children(root, 0, &mut out);
        out
    }
}

fn collect(node: &Node, path: &mut String, out: &mut Vec<WordEntry>) {
    for (symbol, child) in node.children() {
        path.push(symbol);
        if child.is_word() {
            out.push(WordEntry {
                word: path.clone(),
                occurrences: child.occurrences(),
            });
        }
        collect(child, path, out);
        path.pop();
    }
}

fn render_children(node: &Node, depth: usize, out: &mut String) {
    for (symbol, child) in node.children() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{symbol} ({})\n", child.occurrences()));
        render_children(child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::TrieConfig;

    fn sample() -> Trie {
        let mut trie = Trie::new();
        for word in ["bob", "a", "bat", "ass", "za", "z", "z", "Bob"] {
            trie.insert(word);
        }
        trie
    }

    fn entry(word: &str, occurrences: usize) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            occurrences,
        }
    }

    #[test]
    fn words_reconstructs_every_path() {
        let trie = sample();
        let words = TrieView::new(&trie).words();
        assert_eq!(
            words,
            vec![
                entry("Bob", 1),
                entry("a", 1),
                entry("ass", 1),
                entry("bat", 1),
                entry("bob", 1),
                entry("z", 2),
                entry("za", 1),
            ]
        );
        assert_eq!(words.len(), trie.size());
    }

    #[test]
    fn completions_include_prefix_itself() {
        let trie = sample();
        let view = TrieView::new(&trie);
        assert_eq!(view.completions("z"), vec![entry("z", 2), entry("za", 1)]);
        assert_eq!(view.completions("b"), vec![entry("bat", 1), entry("bob", 1)]);
        assert!(view.completions("q").is_empty());
        assert_eq!(view.completions("").len(), trie.size());
    }

    #[test]
    fn completions_fold_prefix() {
        let mut trie = Trie::with_config(TrieConfig {
            case_sensitive: false,
        });
        trie.insert("Hello");
        let view = TrieView::new(&trie);
        assert_eq!(view.completions("HE"), vec![entry("hello", 1)]);
    }

    #[test]
    fn render_indents_by_depth() {
        let mut trie = Trie::new();
        trie.insert("ab");
        trie.insert("c");
        assert_eq!(TrieView::new(&trie).render(), "a (0)\n  b (1)\nc (1)\n");
        assert_eq!(TrieView::new(&Trie::new()).render(), "(empty)\n");
    }
}
