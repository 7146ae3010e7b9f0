use crate::arena::Entry;
use crate::treap::tree::Tree;
use std::fmt;
use std::ptr;

/// A location inside a `TreapSet` that does not borrow the set.
///
/// A position is either an element or the end of the set. It is obtained from
/// `Cursor::position` and consumed by `TreapSet::erase` and `TreapSet::cursor`. A position is
/// only meaningful for the set that produced it and only while its element has not been erased.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    pub(super) entry: Option<Entry>,
}

impl Position {
    /// Returns `true` if this is the end position.
    pub fn is_end(&self) -> bool {
        self.entry.is_none()
    }
}

/// A bidirectional cursor over a `TreapSet`.
///
/// The cursor points either at an element or at the end position, which sits between the maximum
/// and the minimum. Moving forward from the maximum reaches the end position, and moving forward
/// again wraps around to the minimum; moving backwards is symmetric. The cursor borrows the set,
/// so the set cannot be modified while a cursor exists; use `position` to keep a location across
/// modifications.
///
/// # Examples
///
/// ```
/// use dsl_collections::treap::TreapSet;
///
/// let mut set = TreapSet::new();
/// set.insert(1);
/// set.insert(2);
///
/// let mut cursor = set.begin();
/// assert_eq!(cursor.get(), Some(&1));
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&2));
/// cursor.move_next();
/// assert!(cursor.is_end());
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some(&2));
/// ```
pub struct Cursor<'a, T, C> {
    tree: &'a Tree<T, C>,
    entry: Option<Entry>,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(super) fn new(tree: &'a Tree<T, C>, entry: Option<Entry>) -> Self {
        Cursor { tree, entry }
    }

    /// Returns the element the cursor points at, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.entry.map(|entry| tree.key(entry))
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.entry.is_none()
    }

    /// Returns the location of the cursor, detached from the borrow of the set.
    pub fn position(&self) -> Position {
        Position { entry: self.entry }
    }

    fn next_entry(&self) -> Option<Entry> {
        match self.entry {
            Some(entry) => self.tree.successor(entry),
            None => self.tree.first(),
        }
    }

    fn prev_entry(&self) -> Option<Entry> {
        match self.entry {
            Some(entry) => self.tree.predecessor(entry),
            None => self.tree.last(),
        }
    }

    /// Moves the cursor to the next element in order.
    pub fn move_next(&mut self) {
        self.entry = self.next_entry();
    }

    /// Moves the cursor to the previous element in order. From the end position this moves to
    /// the maximum.
    pub fn move_prev(&mut self) {
        self.entry = self.prev_entry();
    }

    /// Returns the element after the cursor without moving it.
    pub fn peek_next(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.next_entry().map(|entry| tree.key(entry))
    }

    /// Returns the element before the cursor without moving it.
    pub fn peek_prev(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.prev_entry().map(|entry| tree.key(entry))
    }
}

impl<'a, T, C> Clone for Cursor<'a, T, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, C> Copy for Cursor<'a, T, C> {}

impl<'a, T, C> PartialEq for Cursor<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.entry == other.entry
    }
}

impl<'a, T, C> Eq for Cursor<'a, T, C> {}

impl<'a, T, C> fmt::Debug for Cursor<'a, T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}
