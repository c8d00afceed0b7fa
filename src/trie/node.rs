use std::collections::BTreeMap;

/// Symbol held by the root. It is never compared against input.
pub(crate) const ROOT_SYMBOL: char = '\0';

/// One prefix position in the trie.
///
/// A node with zero occurrences is not a stored word; it exists only to host
/// descendants. Non-root nodes with zero occurrences and no children are
/// unlinked as soon as that state arises.
#[derive(Debug, Clone)]
pub struct Node {
    symbol: char,
    occurrences: usize,
    // An empty BTreeMap does not allocate, so leaves carry no child storage.
    children: BTreeMap<char, Node>,
}

impl Node {
    pub(crate) fn new(symbol: char) -> Self {
        Node {
            symbol,
            occurrences: 0,
            children: BTreeMap::new(),
        }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Net insertions of the word ending here.
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    pub fn is_word(&self) -> bool {
        self.occurrences > 0
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in ascending symbol order.
    pub fn children(&self) -> impl Iterator<Item = (char, &Node)> + '_ {
        self.children.iter().map(|(symbol, node)| (*symbol, node))
    }

    pub fn child(&self, symbol: char) -> Option<&Node> {
        self.children.get(&symbol)
    }

    /// Walks `word` below this node, creating nodes on demand, and bumps the
    /// terminal's count. Returns the new count, or 0 for an empty word.
    pub(crate) fn insert(&mut self, word: &[char]) -> usize {
        let Some((&first, rest)) = word.split_first() else {
            return 0;
        };
        let child = self
            .children
            .entry(first)
            .or_insert_with(|| Node::new(first));
        if rest.is_empty() {
            child.occurrences += 1;
            child.occurrences
        } else {
            child.insert(rest)
        }
    }

    /// Clears every occurrence of `word` below this node and prunes the
    /// emptied leaves on the way back up. Returns whether a positive count
    /// was cleared.
    pub(crate) fn remove(&mut self, word: &[char]) -> bool {
        let Some((&first, rest)) = word.split_first() else {
            return false;
        };
        let Some(child) = self.children.get_mut(&first) else {
            return false;
        };
        let cleared = if rest.is_empty() {
            let before = child.occurrences;
            child.occurrences = 0;
            before > 0
        } else {
            child.remove(rest)
        };
        if child.occurrences == 0 && child.children.is_empty() {
            self.children.remove(&first);
        }
        cleared
    }

    pub(crate) fn lookup(&self, word: &[char]) -> Option<&Node> {
        let (&first, rest) = word.split_first()?;
        let child = self.children.get(&first)?;
        if rest.is_empty() {
            Some(child)
        } else {
            child.lookup(rest)
        }
    }
}
