use crate::arena::{Entry, TypedArena};
use crate::compare::Comparator;
use crate::error::Result;
use crate::treap::node::Node;
use log::{debug, trace};
use rand::{Rng, XorShiftRng};
use std::vec::Vec;

const CHUNK_SIZE: usize = 256;

/// The node graph of a treap together with everything needed to keep it balanced.
///
/// The tree is the only owner of its nodes. Child links own, parent links are back-references
/// used for upward traversal only.
pub struct Tree<T, C> {
    arena: TypedArena<Node<T>>,
    root: Option<Entry>,
    len: usize,
    comparator: C,
    rng: XorShiftRng,
}

impl<T, C> Tree<T, C> {
    pub fn new(comparator: C, rng: XorShiftRng) -> Self {
        Tree {
            arena: TypedArena::new(CHUNK_SIZE),
            root: None,
            len: 0,
            comparator,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn key(&self, entry: Entry) -> &T {
        &self.arena[entry].key
    }

    pub fn contains_entry(&self, entry: Entry) -> bool {
        self.arena.get(&entry).is_some()
    }

    fn priority_of(&self, link: Option<Entry>) -> Option<u32> {
        link.map(|entry| self.arena[entry].priority)
    }

    // Points whichever link of `parent` referenced `old` (or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Entry>, old: Entry, new: Option<Entry>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = &mut self.arena[parent];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            },
        }
    }

    // Lifts the left child of `entry` into its place and returns the lifted child.
    fn rotate_right(&mut self, entry: Entry) -> Entry {
        let child = self.arena[entry]
            .left
            .expect("Expected left child node to be `Some`.");
        let parent = self.arena[entry].parent;
        let grandchild = self.arena[child].right;

        self.arena[entry].left = grandchild;
        if let Some(grandchild) = grandchild {
            self.arena[grandchild].parent = Some(entry);
        }
        self.arena[child].right = Some(entry);
        self.arena[entry].parent = Some(child);
        self.arena[child].parent = parent;
        self.replace_child(parent, entry, Some(child));
        child
    }

    // Lifts the right child of `entry` into its place and returns the lifted child.
    fn rotate_left(&mut self, entry: Entry) -> Entry {
        let child = self.arena[entry]
            .right
            .expect("Expected right child node to be `Some`.");
        let parent = self.arena[entry].parent;
        let grandchild = self.arena[child].left;

        self.arena[entry].right = grandchild;
        if let Some(grandchild) = grandchild {
            self.arena[grandchild].parent = Some(entry);
        }
        self.arena[child].left = Some(entry);
        self.arena[entry].parent = Some(child);
        self.arena[child].parent = parent;
        self.replace_child(parent, entry, Some(child));
        child
    }

    // Restores the heap property between `entry` and its children. Returns the root of the
    // subtree afterwards.
    fn balance(&mut self, entry: Entry) -> Entry {
        let (priority, left, right) = {
            let node = &self.arena[entry];
            (Some(node.priority), node.left, node.right)
        };
        if self.priority_of(left) > priority {
            self.rotate_right(entry)
        } else if self.priority_of(right) > priority {
            self.rotate_left(entry)
        } else {
            entry
        }
    }

    pub fn minimum(&self, mut entry: Entry) -> Entry {
        while let Some(left) = self.arena[entry].left {
            entry = left;
        }
        entry
    }

    pub fn maximum(&self, mut entry: Entry) -> Entry {
        while let Some(right) = self.arena[entry].right {
            entry = right;
        }
        entry
    }

    pub fn first(&self) -> Option<Entry> {
        self.root.map(|root| self.minimum(root))
    }

    pub fn last(&self) -> Option<Entry> {
        self.root.map(|root| self.maximum(root))
    }

    /// Returns the in-order successor of `entry`, or `None` if `entry` holds the maximum.
    pub fn successor(&self, entry: Entry) -> Option<Entry> {
        if let Some(right) = self.arena[entry].right {
            return Some(self.minimum(right));
        }

        let mut child = entry;
        let mut curr = self.arena[entry].parent;
        while let Some(parent) = curr {
            if self.arena[parent].right != Some(child) {
                break;
            }
            child = parent;
            curr = self.arena[parent].parent;
        }
        curr
    }

    /// Returns the in-order predecessor of `entry`, or `None` if `entry` holds the minimum.
    pub fn predecessor(&self, entry: Entry) -> Option<Entry> {
        if let Some(left) = self.arena[entry].left {
            return Some(self.maximum(left));
        }

        let mut child = entry;
        let mut curr = self.arena[entry].parent;
        while let Some(parent) = curr {
            if self.arena[parent].left != Some(child) {
                break;
            }
            child = parent;
            curr = self.arena[parent].parent;
        }
        curr
    }

    // Hooks a freshly allocated node under `parent` and rebalances every ancestor on the way
    // back up to the root.
    fn link(&mut self, entry: Entry, parent: Option<Entry>, is_left: bool) {
        match parent {
            None => self.root = Some(entry),
            Some(parent) => {
                if is_left {
                    self.arena[parent].left = Some(entry);
                } else {
                    self.arena[parent].right = Some(entry);
                }
            },
        }
        self.len += 1;

        let mut curr = parent;
        while let Some(ancestor) = curr {
            let top = self.balance(ancestor);
            curr = self.arena[top].parent;
        }
    }

    /// Removes the node at `entry` and returns its key.
    ///
    /// The node is rotated towards its higher priority child until it becomes a leaf, then
    /// detached. When both children have the same priority the right child is lifted.
    ///
    /// # Panics
    ///
    /// Panics if `entry` does not reference a live node.
    pub fn erase(&mut self, entry: Entry) -> T {
        let mut depth = 0;
        loop {
            let (left, right) = {
                let node = &self.arena[entry];
                (node.left, node.right)
            };
            let lift_left = match (left, right) {
                (None, None) => break,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (Some(left), Some(right)) => {
                    self.arena[left].priority > self.arena[right].priority
                },
            };
            if lift_left {
                self.rotate_right(entry);
            } else {
                self.rotate_left(entry);
            }
            depth += 1;
        }

        let parent = self.arena[entry].parent;
        self.replace_child(parent, entry, None);
        self.len -= 1;
        trace!("treap erase rotated node down {} levels", depth);
        self.arena.free(&entry).key
    }

    pub fn clear(&mut self) {
        debug!("clearing treap with {} nodes", self.len);
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Consumes the tree, returning its keys in order.
    pub fn into_keys(mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len);
        let mut curr = self.first();
        while let Some(entry) = curr {
            order.push(entry);
            curr = self.successor(entry);
        }
        order
            .iter()
            .map(|entry| self.arena.free(entry).key)
            .collect()
    }

    fn copy_subtree(&mut self, source: &Self, entry: Entry, parent: Option<Entry>) -> Entry
    where
        T: Clone,
    {
        let node = &source.arena[entry];
        let copy = self
            .arena
            .allocate(Node::new(node.key.clone(), node.priority, parent));
        let left = node.left.map(|left| self.copy_subtree(source, left, Some(copy)));
        let right = node.right.map(|right| self.copy_subtree(source, right, Some(copy)));
        self.arena[copy].left = left;
        self.arena[copy].right = right;
        copy
    }
}

impl<T, C> Tree<T, C>
where
    C: Comparator<T>,
{
    // Returns `None` if an equivalent key exists, otherwise the parent the key would hang from
    // and whether it would be its left child.
    fn search_vacant(&self, key: &T) -> Option<(Option<Entry>, bool)> {
        let mut parent = None;
        let mut is_left = false;
        let mut curr = self.root;
        while let Some(entry) = curr {
            let node = &self.arena[entry];
            parent = Some(entry);
            if self.comparator.less(key, &node.key) {
                is_left = true;
                curr = node.left;
            } else if self.comparator.less(&node.key, key) {
                is_left = false;
                curr = node.right;
            } else {
                return None;
            }
        }
        Some((parent, is_left))
    }

    /// Inserts `key` unless an equivalent key is present. Returns `true` if a node was created.
    pub fn insert(&mut self, key: T) -> bool {
        match self.search_vacant(&key) {
            None => false,
            Some((parent, is_left)) => {
                let priority = self.rng.next_u32();
                let entry = self.arena.allocate(Node::new(key, priority, parent));
                self.link(entry, parent, is_left);
                true
            },
        }
    }

    /// Same as `insert`, but reports allocation failure instead of aborting.
    pub fn try_insert(&mut self, key: T) -> Result<bool> {
        match self.search_vacant(&key) {
            None => Ok(false),
            Some((parent, is_left)) => {
                let priority = self.rng.next_u32();
                let entry = self.arena.try_allocate(Node::new(key, priority, parent))?;
                self.link(entry, parent, is_left);
                Ok(true)
            },
        }
    }

    pub fn find(&self, key: &T) -> Option<Entry> {
        let mut curr = self.root;
        while let Some(entry) = curr {
            let node = &self.arena[entry];
            if self.comparator.less(key, &node.key) {
                curr = node.left;
            } else if self.comparator.less(&node.key, key) {
                curr = node.right;
            } else {
                return Some(entry);
            }
        }
        None
    }

    /// Returns the leftmost node whose key does not go before `key`.
    pub fn lower_bound(&self, key: &T) -> Option<Entry> {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(entry) = curr {
            let node = &self.arena[entry];
            if self.comparator.less(&node.key, key) {
                curr = node.right;
            } else {
                ret = Some(entry);
                curr = node.left;
            }
        }
        ret
    }

    /// Returns the leftmost node whose key goes after `key`.
    pub fn upper_bound(&self, key: &T) -> Option<Entry> {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(entry) = curr {
            let node = &self.arena[entry];
            if self.comparator.less(key, &node.key) {
                ret = Some(entry);
                curr = node.left;
            } else {
                curr = node.right;
            }
        }
        ret
    }

    /// Walks the whole tree asserting the search tree order, the heap order on priorities and
    /// the consistency of parent links. Returns the number of nodes visited.
    #[cfg(test)]
    pub fn validate(&self) -> usize {
        fn visit<T, C: Comparator<T>>(
            tree: &Tree<T, C>,
            entry: Entry,
            parent: Option<Entry>,
        ) -> usize {
            let node = &tree.arena[entry];
            assert_eq!(node.parent, parent);
            let mut count = 1;
            for child in node.left.iter().chain(node.right.iter()) {
                assert!(tree.arena[*child].priority <= node.priority);
                count += visit(tree, *child, Some(entry));
            }
            if let Some(left) = node.left {
                let max = tree.maximum(left);
                assert!(tree.comparator.less(&tree.arena[max].key, &node.key));
            }
            if let Some(right) = node.right {
                let min = tree.minimum(right);
                assert!(tree.comparator.less(&node.key, &tree.arena[min].key));
            }
            count
        }

        let count = self.root.map_or(0, |root| visit(self, root, None));
        assert_eq!(count, self.len);
        assert_eq!(count, self.arena.len());
        count
    }
}

impl<T, C> Clone for Tree<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Tree::new(self.comparator.clone(), self.rng.clone());
        let root = self.root.map(|root| tree.copy_subtree(self, root, None));
        tree.root = root;
        tree.len = self.len;
        tree
    }
}
