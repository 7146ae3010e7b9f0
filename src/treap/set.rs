use crate::arena::Entry;
use crate::compare::{Comparator, Natural};
use crate::error::Result;
use crate::treap::cursor::{Cursor, Position};
use crate::treap::tree::Tree;
use rand::{SeedableRng, XorShiftRng};
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::ops::{Bound, RangeBounds};
use std::vec;

/// An ordered set implemented using a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property.
/// Each node has a key and a priority. The key of any node goes after all keys in its left
/// subtree and before all keys in its right subtree, as decided by the set's comparator. The
/// priority of a node is at least the priority of its children. By randomly generating priorities,
/// the expected height of the tree is proportional to the logarithm of the number of keys.
///
/// Priorities come from a generator owned by the set, so two sets built with the same seed and
/// the same operations have the same shape.
///
/// # Examples
///
/// ```
/// use dsl_collections::treap::TreapSet;
///
/// let mut set = TreapSet::new();
/// for key in &[5, 1, 9, 3, 7] {
///     set.insert(*key);
/// }
///
/// assert_eq!(set.len(), 5);
/// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5, &7, &9]);
///
/// assert_eq!(set.lower_bound(&4).get(), Some(&5));
/// assert_eq!(set.upper_bound(&5).get(), Some(&7));
/// assert!(set.lower_bound(&10).is_end());
///
/// set.erase(set.find(&7).position());
/// assert!(set.find(&7).is_end());
/// assert_eq!(set.len(), 4);
/// ```
pub struct TreapSet<T, C = Natural> {
    tree: Tree<T, C>,
}

impl<T> TreapSet<T> {
    /// Constructs a new, empty `TreapSet<T>` ordered by `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let set: TreapSet<u32> = TreapSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Constructs a new, empty `TreapSet<T>` ordered by `Ord` whose priorities are drawn from a
    /// generator seeded with `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is all zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let set: TreapSet<u32> = TreapSet::with_seed([1, 2, 3, 4]);
    /// ```
    pub fn with_seed(seed: [u32; 4]) -> Self {
        Self::with_comparator_and_seed(Natural, seed)
    }
}

impl<T, C> TreapSet<T, C> {
    /// Constructs a new, empty set ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::with_comparator(|a: &i32, b: &i32| a > b);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.iter().collect::<Vec<&i32>>(), vec![&2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        TreapSet {
            tree: Tree::new(comparator, XorShiftRng::new_unseeded()),
        }
    }

    /// Constructs a new, empty set ordered by `comparator` whose priorities are drawn from a
    /// generator seeded with `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is all zeros.
    pub fn with_comparator_and_seed(comparator: C, seed: [u32; 4]) -> Self {
        TreapSet {
            tree: Tree::new(comparator, XorShiftRng::from_seed(seed)),
        }
    }

    /// Returns the comparator that orders the set.
    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let set: TreapSet<u32> = TreapSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert!(set.begin() == set.end());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a cursor at the minimum of the set, or at the end position if the set is empty.
    pub fn begin(&self) -> Cursor<'_, T, C> {
        Cursor::new(&self.tree, self.tree.first())
    }

    /// Returns a cursor at the end position.
    pub fn end(&self) -> Cursor<'_, T, C> {
        Cursor::new(&self.tree, None)
    }

    /// Returns a cursor at a previously saved position.
    ///
    /// # Panics
    ///
    /// Panics if `position` references an element that is no longer in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// let position = set.find(&1).position();
    /// set.insert(2);
    /// assert_eq!(set.cursor(position).peek_next(), Some(&2));
    /// ```
    pub fn cursor(&self, position: Position) -> Cursor<'_, T, C> {
        self.check_position(position);
        Cursor::new(&self.tree, position.entry)
    }

    fn check_position(&self, position: Position) {
        if let Some(entry) = position.entry {
            assert!(
                self.tree.contains_entry(entry),
                "Error: position does not reference an element of the set.",
            );
        }
    }

    /// Removes the element at `position` from the set and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end position or references an element that is no longer in
    /// the set. A position kept across the erasure of its element may be recycled for a later
    /// insertion, in which case it references the new element.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.erase(set.begin().position()), 1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn erase(&mut self, position: Position) -> T {
        let entry = position
            .entry
            .expect("Error: attempting to erase the end position.");
        self.check_position(position);
        self.tree.erase(entry)
    }

    /// Returns the minimum element of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.begin().get()
    }

    /// Returns the maximum element of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.end().peek_prev()
    }

    /// Swaps the contents of two sets without touching their elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut a = TreapSet::new();
    /// let mut b = TreapSet::new();
    /// a.insert(1);
    /// a.swap(&mut b);
    /// assert!(a.is_empty());
    /// assert!(b.contains(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.tree, &mut other.tree);
    }

    /// Returns an iterator over the set. The iterator will yield elements in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapSetIter<'_, T, C> {
        TreapSetIter {
            tree: &self.tree,
            front: self.tree.first(),
            back: self.tree.last(),
        }
    }
}

impl<T, C> TreapSet<T, C>
where
    C: Comparator<T>,
{
    /// Inserts a key into the set. If an equivalent key already exists the set is left untouched,
    /// `key` is dropped and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// assert!(set.insert(1));
    /// assert!(!set.insert(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        self.tree.insert(key)
    }

    /// Inserts a key into the set like `insert`, but returns an error instead of aborting when
    /// storage for the new element cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// assert_eq!(set.try_insert(1).unwrap(), true);
    /// assert_eq!(set.try_insert(1).unwrap(), false);
    /// ```
    pub fn try_insert(&mut self, key: T) -> Result<bool> {
        self.tree.try_insert(key)
    }

    /// Removes a key from the set. Returns the removed key, or `None` if no equivalent key
    /// exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let entry = self.tree.find(key)?;
        Some(self.tree.erase(entry))
    }

    /// Checks if an equivalent key exists in the set.
    pub fn contains(&self, key: &T) -> bool {
        self.tree.find(key).is_some()
    }

    /// Returns a cursor at the element equivalent to `key`, or at the end position if there is
    /// none.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert_eq!(set.find(&1).get(), Some(&1));
    /// assert!(set.find(&2) == set.end());
    /// ```
    pub fn find(&self, key: &T) -> Cursor<'_, T, C> {
        Cursor::new(&self.tree, self.tree.find(key))
    }

    /// Returns a cursor at the first element that does not go before `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.lower_bound(&1).get(), Some(&1));
    /// assert_eq!(set.lower_bound(&2).get(), Some(&3));
    /// assert!(set.lower_bound(&4).is_end());
    /// ```
    pub fn lower_bound(&self, key: &T) -> Cursor<'_, T, C> {
        Cursor::new(&self.tree, self.tree.lower_bound(key))
    }

    /// Returns a cursor at the first element that goes after `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.upper_bound(&1).get(), Some(&3));
    /// assert!(set.upper_bound(&3).is_end());
    /// ```
    pub fn upper_bound(&self, key: &T) -> Cursor<'_, T, C> {
        Cursor::new(&self.tree, self.tree.upper_bound(key))
    }

    /// Returns an iterator over the elements that fall inside `range`, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::treap::TreapSet;
    ///
    /// let set: TreapSet<u32> = (0..10).collect();
    /// assert_eq!(set.range(3..6).collect::<Vec<&u32>>(), vec![&3, &4, &5]);
    /// assert_eq!(set.range(..=1).collect::<Vec<&u32>>(), vec![&0, &1]);
    /// assert_eq!(set.range(8..).rev().collect::<Vec<&u32>>(), vec![&9, &8]);
    /// ```
    pub fn range<R>(&self, range: R) -> TreapSetIter<'_, T, C>
    where
        R: RangeBounds<T>,
    {
        let tree = &self.tree;
        let front = match range.start_bound() {
            Bound::Included(key) => tree.lower_bound(key),
            Bound::Excluded(key) => tree.upper_bound(key),
            Bound::Unbounded => tree.first(),
        };
        let after = |bound: Option<Entry>| match bound {
            Some(entry) => tree.predecessor(entry),
            None => tree.last(),
        };
        let back = match range.end_bound() {
            Bound::Included(key) => after(tree.upper_bound(key)),
            Bound::Excluded(key) => after(tree.lower_bound(key)),
            Bound::Unbounded => tree.last(),
        };

        match (front, back) {
            (Some(first), Some(last))
                if !tree.comparator().less(tree.key(last), tree.key(first)) =>
            {
                TreapSetIter {
                    tree,
                    front,
                    back,
                }
            },
            _ => TreapSetIter {
                tree,
                front: None,
                back: None,
            },
        }
    }
}

impl<T> Default for TreapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Clone for TreapSet<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        TreapSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T, C> fmt::Debug for TreapSet<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for TreapSet<T, C>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, C> Eq for TreapSet<T, C> where T: Eq {}

impl<T, C> Extend<T> for TreapSet<T, C>
where
    C: Comparator<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> FromIterator<T> for TreapSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = TreapSet::new();
        set.extend(iter);
        set
    }
}

impl<T, C> IntoIterator for TreapSet<T, C> {
    type IntoIter = TreapSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            keys: self.tree.into_keys().into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a TreapSet<T, C>
where
    T: 'a,
{
    type IntoIter = TreapSetIter<'a, T, C>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreapSet<T, C>`.
///
/// This iterator traverses the elements of the set in order and yields owned keys.
pub struct TreapSetIntoIter<T> {
    keys: vec::IntoIter<T>,
}

impl<T> Iterator for TreapSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<T> DoubleEndedIterator for TreapSetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back()
    }
}

impl<T> ExactSizeIterator for TreapSetIntoIter<T> {}

/// An iterator for `TreapSet<T, C>`.
///
/// This iterator traverses the elements of the set in order and yields immutable references.
pub struct TreapSetIter<'a, T, C> {
    tree: &'a Tree<T, C>,
    front: Option<Entry>,
    back: Option<Entry>,
}

impl<'a, T, C> Iterator for TreapSetIter<'a, T, C>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.tree.successor(entry);
        }
        Some(self.tree.key(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.front {
            Some(_) => (1, Some(self.tree.len())),
            None => (0, Some(0)),
        }
    }
}

impl<'a, T, C> DoubleEndedIterator for TreapSetIter<'a, T, C>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let entry = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.tree.predecessor(entry);
        }
        Some(self.tree.key(entry))
    }
}

impl<'a, T, C> Clone for TreapSetIter<'a, T, C> {
    fn clone(&self) -> Self {
        TreapSetIter {
            tree: self.tree,
            front: self.front,
            back: self.back,
        }
    }
}
