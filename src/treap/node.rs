use crate::arena::Entry;

/// A struct representing an internal node of a treap.
///
/// Links are arena handles; `None` marks a missing child, or a missing parent at the root.
pub struct Node<T> {
    pub key: T,
    pub priority: u32,
    pub left: Option<Entry>,
    pub right: Option<Entry>,
    pub parent: Option<Entry>,
}

impl<T> Node<T> {
    pub fn new(key: T, priority: u32, parent: Option<Entry>) -> Self {
        Node {
            key,
            priority,
            left: None,
            right: None,
            parent,
        }
    }
}
