//! Bucket chains stored in a single arena
//!
//! Slots `0..buckets` hold the sentinel heads. Real entries live after them
//! and are linked through `next` indices. Vacated slots go on a free list.

/// Node in a bucket's singly-linked chain
struct Node {
    key: String,
    value: String,
    next: Option<usize>,
}

impl Node {
    fn sentinel() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
            next: None,
        }
    }
}

/// Location of a matched entry and the node linking to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found {
    /// Arena slot of the matched entry
    pub entry: usize,
    /// Arena slot of its predecessor (possibly a sentinel)
    pub prev: usize,
}

/// Fixed set of bucket chains
pub struct Chains {
    nodes: Vec<Option<Node>>,
    free_list: Vec<usize>,
    buckets: usize,
    len: usize,
}

impl Chains {
    /// Create `buckets` empty chains
    pub fn new(buckets: usize) -> Self {
        assert!(buckets > 0, "Bucket count must be greater than 0");

        let mut nodes = Vec::with_capacity(buckets);
        nodes.extend((0..buckets).map(|_| Some(Node::sentinel())));

        Self {
            nodes,
            free_list: Vec::new(),
            buckets,
            len: 0,
        }
    }

    /// Find `key` in the chain of `bucket`
    pub fn find(&self, bucket: usize, key: &str) -> Option<Found> {
        let mut prev = bucket;
        let mut cursor = self.node(bucket).next;

        while let Some(idx) = cursor {
            let node = self.node(idx);
            if node.key == key {
                return Some(Found { entry: idx, prev });
            }
            prev = idx;
            cursor = node.next;
        }

        None
    }

    /// Value stored at a found entry
    pub fn value(&self, found: Found) -> &str {
        &self.node(found.entry).value
    }

    /// Mutable value stored at a found entry
    pub fn value_mut(&mut self, found: Found) -> &mut String {
        &mut self.node_mut(found.entry).value
    }

    /// Link a new entry at the tail of `bucket`'s chain
    ///
    /// The caller must have checked that `key` is absent.
    pub fn append(&mut self, bucket: usize, key: String, value: String) -> usize {
        let mut tail = bucket;
        while let Some(next) = self.node(tail).next {
            tail = next;
        }

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key,
            value,
            next: None,
        });
        self.node_mut(tail).next = Some(idx);
        self.len += 1;

        idx
    }

    /// Unlink a found entry and return its value
    pub fn unlink(&mut self, found: Found) -> String {
        let removed = match self.nodes[found.entry].take() {
            Some(node) => node,
            None => unreachable!("found entry slot {} is vacant", found.entry),
        };

        self.node_mut(found.prev).next = removed.next;
        self.free_node(found.entry);
        self.len -= 1;

        removed.value
    }

    /// Number of entries across all chains
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of entries in the chain of `bucket`
    pub fn chain_len(&self, bucket: usize) -> usize {
        let mut count = 0;
        let mut cursor = self.node(bucket).next;
        while let Some(idx) = cursor {
            count += 1;
            cursor = self.node(idx).next;
        }
        count
    }

    /// Drop every entry, keeping the sentinel heads
    pub fn clear(&mut self) {
        self.nodes.truncate(self.buckets);
        for head in self.nodes.iter_mut().flatten() {
            head.next = None;
        }
        self.free_list.clear();
        self.len = 0;
    }

    fn node(&self, idx: usize) -> &Node {
        match &self.nodes[idx] {
            Some(node) => node,
            None => unreachable!("chain links to vacant slot {}", idx),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        match &mut self.nodes[idx] {
            Some(node) => node,
            None => unreachable!("chain links to vacant slot {}", idx),
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn append(chains: &mut Chains, bucket: usize, key: &str, value: &str) -> usize {
        chains.append(bucket, key.to_string(), value.to_string())
    }

    #[test]
    fn test_chain_basic() {
        let mut chains = Chains::new(4);

        append(&mut chains, 1, "a", "1");
        append(&mut chains, 2, "b", "2");

        let a = chains.find(1, "a").unwrap();
        assert_eq!(chains.value(a), "1");
        assert_eq!(a.prev, 1);
        assert_eq!(chains.find(2, "a"), None);
        assert_eq!(chains.len(), 2);
    }

    #[test]
    fn test_chain_order() {
        let mut chains = Chains::new(1);

        let a = append(&mut chains, 0, "a", "1");
        let b = append(&mut chains, 0, "b", "2");
        let c = append(&mut chains, 0, "c", "3");

        assert_eq!(chains.find(0, "a"), Some(Found { entry: a, prev: 0 }));
        assert_eq!(chains.find(0, "b"), Some(Found { entry: b, prev: a }));
        assert_eq!(chains.find(0, "c"), Some(Found { entry: c, prev: b }));
        assert_eq!(chains.chain_len(0), 3);
    }

    #[test]
    fn test_sentinel_never_matches() {
        let mut chains = Chains::new(2);
        assert_eq!(chains.find(0, ""), None);

        append(&mut chains, 0, "", "empty");
        let found = chains.find(0, "").unwrap();
        assert_ne!(found.entry, 0);
        assert_eq!(chains.value(found), "empty");
    }

    #[test]
    fn test_chain_unlink_middle() {
        let mut chains = Chains::new(1);

        let a = append(&mut chains, 0, "a", "1");
        append(&mut chains, 0, "b", "2");
        let c = append(&mut chains, 0, "c", "3");

        let b = chains.find(0, "b").unwrap();
        assert_eq!(chains.unlink(b), "2");

        assert_eq!(chains.find(0, "b"), None);
        assert_eq!(chains.find(0, "c"), Some(Found { entry: c, prev: a }));
        assert_eq!(chains.len(), 2);
    }

    #[test]
    fn test_chain_unlink_head_and_tail() {
        let mut chains = Chains::new(1);

        append(&mut chains, 0, "a", "1");
        let b = append(&mut chains, 0, "b", "2");
        append(&mut chains, 0, "c", "3");

        let a = chains.find(0, "a").unwrap();
        chains.unlink(a);
        assert_eq!(chains.find(0, "b"), Some(Found { entry: b, prev: 0 }));

        let c = chains.find(0, "c").unwrap();
        chains.unlink(c);
        assert_eq!(chains.chain_len(0), 1);
    }

    #[test]
    fn test_slot_reuse() {
        let mut chains = Chains::new(1);

        let a = append(&mut chains, 0, "a", "1");
        let found = chains.find(0, "a").unwrap();
        chains.unlink(found);

        let b = append(&mut chains, 0, "b", "2");
        assert_eq!(a, b);
        assert_eq!(chains.value(chains.find(0, "b").unwrap()), "2");
    }

    #[test]
    fn test_value_mut() {
        let mut chains = Chains::new(1);
        append(&mut chains, 0, "a", "1");

        let found = chains.find(0, "a").unwrap();
        *chains.value_mut(found) = "2".to_string();
        assert_eq!(chains.value(found), "2");
        assert_eq!(chains.len(), 1);
    }

    #[test]
    fn test_chain_clear() {
        let mut chains = Chains::new(3);

        append(&mut chains, 0, "a", "1");
        append(&mut chains, 2, "b", "2");
        chains.clear();

        assert!(chains.is_empty());
        assert_eq!(chains.find(0, "a"), None);
        assert_eq!(chains.chain_len(2), 0);
        assert_eq!(chains.chain_len(1), 0);

        append(&mut chains, 2, "c", "3");
        assert_eq!(chains.len(), 1);
    }
}
