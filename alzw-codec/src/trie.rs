//! Arena ternary search trie keyed by symbol-code sequences.
//!
//! Each node holds one symbol and `lo` / `eq` / `hi` links stored as indices
//! into a node vector. Removing a key prunes nodes that no longer lead to a
//! coded node; their slots go to a free list and are reused by later inserts.

use std::cmp::Ordering;

/// Index of a node in the arena.
pub type NodeId = u32;

#[derive(Debug, Clone)]
struct Node {
    symbol: u8,
    code: Option<u32>,
    lo: Option<NodeId>,
    eq: Option<NodeId>,
    hi: Option<NodeId>,
}

/// Which link leads to a node.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Lo(NodeId),
    Eq(NodeId),
    Hi(NodeId),
}

/// Prefix index mapping sequences to codes.
#[derive(Debug, Clone, Default)]
pub struct PrefixTrie {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
}

impl PrefixTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all keys and nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
    }

    /// Nodes currently in use.
    pub fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Code stored at `node`.
    #[inline]
    pub fn code(&self, node: NodeId) -> Option<u32> {
        self.nodes[node as usize].code
    }

    /// Follow one symbol: from the root level when `parent` is `None`,
    /// otherwise from the level below `parent`.
    pub fn step(&self, parent: Option<NodeId>, symbol: u8) -> Option<NodeId> {
        let mut current = match parent {
            Some(id) => self.nodes[id as usize].eq,
            None => self.root,
        };
        while let Some(id) = current {
            let node = &self.nodes[id as usize];
            current = match symbol.cmp(&node.symbol) {
                Ordering::Less => node.lo,
                Ordering::Greater => node.hi,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Node for the whole of `key`, coded or not.
    pub fn find(&self, key: &[u8]) -> Option<NodeId> {
        let mut node = None;
        for &symbol in key {
            node = Some(self.step(node, symbol)?);
        }
        node
    }

    /// Code stored for exactly `key`.
    pub fn get(&self, key: &[u8]) -> Option<u32> {
        self.find(key).and_then(|node| self.code(node))
    }

    /// Store `code` under `key`, creating the path as needed. Returns the
    /// previous code for `key`, if any.
    pub fn insert(&mut self, key: &[u8], code: u32) -> Option<u32> {
        debug_assert!(!key.is_empty());
        let mut link = Link::Root;
        let mut depth = 0;
        loop {
            let symbol = key[depth];
            let id = match self.follow(link) {
                Some(id) => id,
                None => {
                    let id = self.alloc(symbol);
                    self.set_link(link, Some(id));
                    id
                }
            };
            let node = &self.nodes[id as usize];
            link = match symbol.cmp(&node.symbol) {
                Ordering::Less => Link::Lo(id),
                Ordering::Greater => Link::Hi(id),
                Ordering::Equal if depth + 1 < key.len() => {
                    depth += 1;
                    Link::Eq(id)
                }
                Ordering::Equal => return self.nodes[id as usize].code.replace(code),
            };
        }
    }

    /// Remove `key`, pruning nodes left without a purpose. Returns its code.
    pub fn remove(&mut self, key: &[u8]) -> Option<u32> {
        let mut path: Vec<(Link, NodeId)> = Vec::with_capacity(key.len());
        let mut link = Link::Root;
        let mut depth = 0;
        let removed = loop {
            let id = self.follow(link)?;
            path.push((link, id));
            let node = &self.nodes[id as usize];
            link = match key[depth].cmp(&node.symbol) {
                Ordering::Less => Link::Lo(id),
                Ordering::Greater => Link::Hi(id),
                Ordering::Equal if depth + 1 < key.len() => {
                    depth += 1;
                    Link::Eq(id)
                }
                Ordering::Equal => break self.nodes[id as usize].code.take()?,
            };
        };

        // Walk back up, splicing out nodes that carry no code and no suffixes.
        while let Some((link, id)) = path.pop() {
            let node = &self.nodes[id as usize];
            if node.code.is_some() || node.eq.is_some() {
                break;
            }
            let (lo, hi) = (node.lo, node.hi);
            let replacement = self.splice(lo, hi);
            self.set_link(link, replacement);
            self.release(id);
        }

        Some(removed)
    }

    fn follow(&self, link: Link) -> Option<NodeId> {
        match link {
            Link::Root => self.root,
            Link::Lo(id) => self.nodes[id as usize].lo,
            Link::Eq(id) => self.nodes[id as usize].eq,
            Link::Hi(id) => self.nodes[id as usize].hi,
        }
    }

    fn set_link(&mut self, link: Link, target: Option<NodeId>) {
        match link {
            Link::Root => self.root = target,
            Link::Lo(id) => self.nodes[id as usize].lo = target,
            Link::Eq(id) => self.nodes[id as usize].eq = target,
            Link::Hi(id) => self.nodes[id as usize].hi = target,
        }
    }

    /// Join two sibling subtrees: `hi` hangs off the largest node of `lo`.
    fn splice(&mut self, lo: Option<NodeId>, hi: Option<NodeId>) -> Option<NodeId> {
        let (Some(lo), Some(hi)) = (lo, hi) else {
            return lo.or(hi);
        };
        let mut last = lo;
        while let Some(next) = self.nodes[last as usize].hi {
            last = next;
        }
        self.nodes[last as usize].hi = Some(hi);
        Some(lo)
    }

    fn alloc(&mut self, symbol: u8) -> NodeId {
        let node = Node {
            symbol,
            code: None,
            lo: None,
            eq: None,
            hi: None,
        };
        match self.free.pop() {
            Some(id) => {
                self.nodes[id as usize] = node;
                id
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as NodeId
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        let node = &mut self.nodes[id as usize];
        node.code = None;
        node.lo = None;
        node.eq = None;
        node.hi = None;
        self.free.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PrefixTrie {
        let mut trie = PrefixTrie::new();
        for (code, key) in [&[1u8][..], &[0], &[2], &[1, 0], &[1, 0, 2], &[1, 2]]
            .into_iter()
            .enumerate()
        {
            trie.insert(key, code as u32);
        }
        trie
    }

    #[test]
    fn test_insert_and_get() {
        let trie = sample();
        assert_eq!(trie.get(&[1]), Some(0));
        assert_eq!(trie.get(&[0]), Some(1));
        assert_eq!(trie.get(&[1, 0, 2]), Some(4));
        assert_eq!(trie.get(&[1, 2]), Some(5));
        assert_eq!(trie.get(&[1, 1]), None);
        assert_eq!(trie.get(&[0, 0]), None);
    }

    #[test]
    fn test_insert_replaces_code() {
        let mut trie = sample();
        assert_eq!(trie.insert(&[1, 0], 42), Some(3));
        assert_eq!(trie.get(&[1, 0]), Some(42));
        assert_eq!(trie.insert(&[2, 2], 7), None);
    }

    #[test]
    fn test_step_walks_levels() {
        let trie = sample();
        let one = trie.step(None, 1).unwrap();
        let one_zero = trie.step(Some(one), 0).unwrap();
        assert_eq!(trie.code(one_zero), Some(3));
        assert!(trie.step(Some(one_zero), 1).is_none());
        let one_zero_two = trie.step(Some(one_zero), 2).unwrap();
        assert_eq!(trie.code(one_zero_two), Some(4));
    }

    #[test]
    fn test_remove_leaf_prunes_nodes() {
        let mut trie = sample();
        let before = trie.live_nodes();
        assert_eq!(trie.remove(&[1, 0, 2]), Some(4));
        assert_eq!(trie.get(&[1, 0, 2]), None);
        assert_eq!(trie.live_nodes(), before - 1);
        assert_eq!(trie.get(&[1, 0]), Some(3));
        assert_eq!(trie.get(&[1, 2]), Some(5));
    }

    #[test]
    fn test_remove_inner_key_keeps_suffixes() {
        let mut trie = sample();
        let before = trie.live_nodes();
        assert_eq!(trie.remove(&[1, 0]), Some(3));
        assert_eq!(trie.get(&[1, 0]), None);
        assert_eq!(trie.get(&[1, 0, 2]), Some(4));
        assert_eq!(trie.live_nodes(), before);

        // Dropping the suffix now frees both levels.
        assert_eq!(trie.remove(&[1, 0, 2]), Some(4));
        assert_eq!(trie.live_nodes(), before - 2);
        assert_eq!(trie.get(&[1, 2]), Some(5));
    }

    #[test]
    fn test_remove_node_with_both_siblings() {
        let mut trie = PrefixTrie::new();
        for (code, symbol) in [5u8, 2, 8, 1, 3, 7, 9].into_iter().enumerate() {
            trie.insert(&[symbol], code as u32);
        }
        assert_eq!(trie.remove(&[5]), Some(0));
        for (code, symbol) in [2u8, 8, 1, 3, 7, 9].into_iter().enumerate() {
            assert_eq!(trie.get(&[symbol]), Some(code as u32 + 1));
        }
        assert_eq!(trie.get(&[5]), None);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut trie = sample();
        let before = trie.live_nodes();
        assert_eq!(trie.remove(&[2, 2]), None);
        assert_eq!(trie.remove(&[0, 0, 0]), None);
        assert_eq!(trie.live_nodes(), before);
    }

    #[test]
    fn test_freed_nodes_are_reused() {
        let mut trie = sample();
        trie.remove(&[1, 0, 2]);
        let allocated = trie.nodes.len();
        trie.insert(&[2, 1], 9);
        assert_eq!(trie.nodes.len(), allocated);
        assert_eq!(trie.get(&[2, 1]), Some(9));
    }

    #[test]
    fn test_long_key_removal() {
        let mut trie = PrefixTrie::new();
        let key = vec![3u8; 50_000];
        trie.insert(&key[..1], 0);
        trie.insert(&key, 1);
        assert_eq!(trie.remove(&key), Some(1));
        assert_eq!(trie.live_nodes(), 1);
    }
}
