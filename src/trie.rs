//! Vocabulary trie keyed by Unicode code points.
//!
//! Nodes live in a single arena; children are stored as `(char, node)` pairs
//! sorted by key, and every node keeps the arena index of its parent so a
//! terminal node can reconstruct the string it completes.

pub type NodeId = u32;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct Node {
    key: Option<char>,
    parent: Option<NodeId>,
    children: Vec<(char, NodeId)>,
    end: bool,
    score: f32,
    index: u32,
}

impl Node {
    fn new(key: Option<char>, parent: Option<NodeId>) -> Self {
        Node {
            key,
            parent,
            children: Vec::new(),
            end: false,
            score: 0.0,
            index: 0,
        }
    }

    #[inline]
    fn child(&self, ch: char) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&ch, |&(k, _)| k)
            .ok()
            .map(|pos| self.children[pos].1)
    }
}

/// Handle to a node returned by [`Trie::find`].
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    trie: &'a Trie,
    id: NodeId,
}

impl<'a> Match<'a> {
    /// Whether an inserted word ends exactly at this node.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.trie.nodes[self.id as usize].end
    }

    /// Vocabulary index, if this node is terminal.
    #[inline]
    pub fn index(&self) -> Option<u32> {
        let node = &self.trie.nodes[self.id as usize];
        node.end.then_some(node.index)
    }

    /// Rebuilds `(word, score, index)` by walking parent links to the root.
    pub fn word(&self) -> Option<(String, f32, u32)> {
        let node = &self.trie.nodes[self.id as usize];
        if !node.end {
            return None;
        }
        let mut symbols = Vec::new();
        let mut cur = Some(self.id);
        while let Some(id) = cur {
            let n = &self.trie.nodes[id as usize];
            if let Some(k) = n.key {
                symbols.push(k);
            }
            cur = n.parent;
        }
        let word: String = symbols.into_iter().rev().collect();
        Some((word, node.score, node.index))
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Trie {
            nodes: vec![Node::new(None, None)],
        }
    }

    /// Inserts `word`, overwriting score and index if it is already present.
    /// Returns the index it replaced, if any.
    pub fn insert(&mut self, word: &str, score: f32, index: u32) -> Option<u32> {
        let mut cur = ROOT;
        let mut inserted_any = false;
        for ch in word.chars() {
            inserted_any = true;
            cur = match self.nodes[cur as usize]
                .children
                .binary_search_by_key(&ch, |&(k, _)| k)
            {
                Ok(pos) => self.nodes[cur as usize].children[pos].1,
                Err(pos) => {
                    let id = self.nodes.len() as NodeId;
                    self.nodes.push(Node::new(Some(ch), Some(cur)));
                    self.nodes[cur as usize].children.insert(pos, (ch, id));
                    id
                }
            };
        }
        if !inserted_any {
            return None;
        }
        let node = &mut self.nodes[cur as usize];
        let previous = node.end.then_some(node.index);
        node.end = true;
        node.score = score;
        node.index = index;
        previous
    }

    /// Follows `token` from the root one code point at a time. Returns `None`
    /// as soon as a step is missing; the node reached is not necessarily
    /// terminal.
    pub fn find(&self, token: &str) -> Option<Match<'_>> {
        self.find_chars(token.chars())
    }

    /// Same as [`Trie::find`] over an already decoded code-point sequence.
    pub fn find_chars<I>(&self, chars: I) -> Option<Match<'_>>
    where
        I: IntoIterator<Item = char>,
    {
        let mut cur = ROOT;
        for ch in chars {
            cur = self.nodes[cur as usize].child(ch)?;
        }
        Some(Match { trie: self, id: cur })
    }

    /// Walks `chars` from the root once and returns the length and index of
    /// the longest prefix that ends on a terminal node.
    pub fn longest_prefix(&self, chars: &[char]) -> Option<(usize, u32)> {
        let mut cur = ROOT;
        let mut best = None;
        for (depth, &ch) in chars.iter().enumerate() {
            cur = match self.nodes[cur as usize].child(ch) {
                Some(next) => next,
                None => break,
            };
            let node = &self.nodes[cur as usize];
            if node.end {
                best = Some((depth + 1, node.index));
            }
        }
        best
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trie {
        let mut trie = Trie::new();
        trie.insert("ab", 1.0, 1);
        trie.insert("a", 1.0, 2);
        trie.insert("b", 1.0, 3);
        trie.insert("héllo", 0.5, 7);
        trie
    }

    #[test]
    fn test_find_terminal_and_inner_nodes() {
        let trie = sample();
        assert_eq!(trie.find("ab").and_then(|m| m.index()), Some(1));
        assert_eq!(trie.find("a").and_then(|m| m.index()), Some(2));

        let inner = trie.find("hél").unwrap();
        assert!(!inner.is_end());
        assert_eq!(inner.index(), None);
        assert!(inner.word().is_none());
    }

    #[test]
    fn test_find_missing_path() {
        let trie = sample();
        assert!(trie.find("abc").is_none());
        assert!(trie.find("x").is_none());
        assert!(trie.find("A").is_none());
    }

    #[test]
    fn test_multibyte_chars_are_single_symbols() {
        let trie = sample();
        // root, a, a-b, b, then h-é-l-l-o
        assert_eq!(trie.len(), 1 + 2 + 1 + 5);
        assert!(trie.find("h\u{e9}").is_some());
        // decomposed e + combining acute is a different path
        assert!(trie.find("he\u{301}").is_none());
    }

    #[test]
    fn test_word_reconstruction() {
        let trie = sample();
        let (word, score, index) = trie.find("héllo").unwrap().word().unwrap();
        assert_eq!(word, "héllo");
        assert_eq!(score, 0.5);
        assert_eq!(index, 7);
    }

    #[test]
    fn test_reinsert_last_write_wins() {
        let mut trie = sample();
        assert_eq!(trie.insert("ab", 2.0, 42), Some(1));
        let (_, score, index) = trie.find("ab").unwrap().word().unwrap();
        assert_eq!((score, index), (2.0, 42));
    }

    #[test]
    fn test_longest_prefix_skips_inner_nodes() {
        let trie = sample();
        let word: Vec<char> = "héllx".chars().collect();
        // "hé", "hél", "héll" are inner nodes only
        assert_eq!(trie.longest_prefix(&word), None);

        let word: Vec<char> = "abz".chars().collect();
        assert_eq!(trie.longest_prefix(&word), Some((2, 1)));
        let word: Vec<char> = "ba".chars().collect();
        assert_eq!(trie.longest_prefix(&word), Some((1, 3)));
        assert_eq!(trie.longest_prefix(&[]), None);
    }

    #[test]
    fn test_empty_word_is_ignored() {
        let mut trie = Trie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.insert("", 1.0, 5), None);
        assert!(trie.is_empty());
        let root = trie.find("").unwrap();
        assert!(!root.is_end());
    }
}
