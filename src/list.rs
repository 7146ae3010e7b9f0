//! Doubly linked list whose nodes live in an arena.

use crate::arena::{Entry, TypedArena};
use crate::error::Result;
use log::debug;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

const CHUNK_SIZE: usize = 64;

struct Node<T> {
    value: T,
    prev: Option<Entry>,
    next: Option<Entry>,
}

/// A location inside a `LinkedList`: either an element or the end of the list.
///
/// Positions stay valid across insertions and across removals of other elements.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    entry: Option<Entry>,
}

impl Position {
    /// Returns `true` if this is the end position.
    pub fn is_end(&self) -> bool {
        self.entry.is_none()
    }
}

/// A doubly linked list.
///
/// Elements can be inserted and erased at any position in `O(1)` time. The end position sits
/// after the last element; inserting at it appends, and stepping back from it reaches the last
/// element.
///
/// # Examples
///
/// ```
/// use dsl_collections::list::LinkedList;
///
/// let mut list = LinkedList::new();
/// list.push_back(2);
/// list.push_front(1);
///
/// let end = list.end();
/// let three = list.insert(end, 3);
/// assert_eq!(list.get(three), Some(&3));
/// assert_eq!(list.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
///
/// let (value, next) = list.erase(list.begin());
/// assert_eq!(value, 1);
/// assert_eq!(list.get(next), Some(&2));
/// ```
pub struct LinkedList<T> {
    arena: TypedArena<Node<T>>,
    head: Option<Entry>,
    tail: Option<Entry>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Constructs a new, empty `LinkedList<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::list::LinkedList;
    ///
    /// let list: LinkedList<u32> = LinkedList::new();
    /// ```
    pub fn new() -> Self {
        LinkedList {
            arena: TypedArena::new(CHUNK_SIZE),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes all elements from the list.
    pub fn clear(&mut self) {
        debug!("clearing linked list with {} elements", self.len);
        self.arena.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Swaps the contents of two lists without touching their elements.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns the position of the first element, or the end position if the list is empty.
    pub fn begin(&self) -> Position {
        Position { entry: self.head }
    }

    /// Returns the end position.
    pub fn end(&self) -> Position {
        Position { entry: None }
    }

    fn check_position(&self, position: Position) {
        if let Some(entry) = position.entry {
            assert!(
                self.arena.get(&entry).is_some(),
                "Error: position does not reference an element of the list.",
            );
        }
    }

    /// Returns the position after `position`. The position after the end is the first element.
    ///
    /// # Panics
    ///
    /// Panics if `position` references an element that is no longer in the list.
    pub fn next(&self, position: Position) -> Position {
        self.check_position(position);
        match position.entry {
            Some(entry) => Position {
                entry: self.arena[entry].next,
            },
            None => self.begin(),
        }
    }

    /// Returns the position before `position`. The position before the end is the last element,
    /// and the position before the first element is the end.
    ///
    /// # Panics
    ///
    /// Panics if `position` references an element that is no longer in the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::list::LinkedList;
    ///
    /// let list: LinkedList<u32> = vec![1, 2].into_iter().collect();
    /// let last = list.prev(list.end());
    /// assert_eq!(list.get(last), Some(&2));
    /// ```
    pub fn prev(&self, position: Position) -> Position {
        self.check_position(position);
        match position.entry {
            Some(entry) => Position {
                entry: self.arena[entry].prev,
            },
            None => Position { entry: self.tail },
        }
    }

    /// Returns the element at `position`, or `None` at the end position or if the element is no
    /// longer in the list.
    pub fn get(&self, position: Position) -> Option<&T> {
        position
            .entry
            .and_then(|entry| self.arena.get(&entry))
            .map(|node| &node.value)
    }

    /// Returns a mutable reference to the element at `position`, or `None` at the end position or
    /// if the element is no longer in the list.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        let arena = &mut self.arena;
        position
            .entry
            .and_then(move |entry| arena.get_mut(&entry))
            .map(|node| &mut node.value)
    }

    // Splices an allocated, unlinked node in front of `next`.
    fn link_before(&mut self, entry: Entry, next: Option<Entry>) {
        let prev = match next {
            Some(next) => self.arena[next].prev,
            None => self.tail,
        };
        {
            let node = &mut self.arena[entry];
            node.prev = prev;
            node.next = next;
        }
        match prev {
            Some(prev) => self.arena[prev].next = Some(entry),
            None => self.head = Some(entry),
        }
        match next {
            Some(next) => self.arena[next].prev = Some(entry),
            None => self.tail = Some(entry),
        }
        self.len += 1;
    }

    /// Inserts `value` before `position` and returns the position of the new element.
    ///
    /// # Panics
    ///
    /// Panics if `position` references an element that is no longer in the list.
    pub fn insert(&mut self, position: Position, value: T) -> Position {
        self.check_position(position);
        let entry = self.arena.allocate(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_before(entry, position.entry);
        Position { entry: Some(entry) }
    }

    /// Inserts `value` before `position` like `insert`, but returns an error instead of aborting
    /// when storage for the new element cannot be allocated.
    ///
    /// # Panics
    ///
    /// Panics if `position` references an element that is no longer in the list.
    pub fn try_insert(&mut self, position: Position, value: T) -> Result<Position> {
        self.check_position(position);
        let entry = self.arena.try_allocate(Node {
            value,
            prev: None,
            next: None,
        })?;
        self.link_before(entry, position.entry);
        Ok(Position { entry: Some(entry) })
    }

    /// Removes the element at `position`. Returns the element and the position that followed it.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end position or references an element that is no longer in
    /// the list.
    pub fn erase(&mut self, position: Position) -> (T, Position) {
        let entry = position
            .entry
            .expect("Error: attempting to erase the end position.");
        self.check_position(position);
        let node = self.arena.free(&entry);
        match node.prev {
            Some(prev) => self.arena[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.arena[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        (node.value, Position { entry: node.next })
    }

    /// Inserts a value at the front of the list.
    pub fn push_front(&mut self, value: T) {
        let begin = self.begin();
        self.insert(begin, value);
    }

    /// Inserts a value at the back of the list.
    pub fn push_back(&mut self, value: T) {
        self.insert(self.end(), value);
    }

    /// Inserts a value at the back of the list, returning an error instead of aborting when
    /// storage for it cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::list::LinkedList;
    ///
    /// let mut list = LinkedList::new();
    /// list.try_push_back(1).unwrap();
    /// assert_eq!(list.back(), Some(&1));
    /// ```
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        self.try_insert(self.end(), value).map(|_| ())
    }

    /// Removes the first element of the list and returns it, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let begin = self.begin();
        if begin.is_end() {
            return None;
        }
        Some(self.erase(begin).0)
    }

    /// Removes the last element of the list and returns it, or `None` if the list is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.tail?;
        Some(self.erase(Position { entry: Some(last) }).0)
    }

    /// Returns the first element of the list, or `None` if the list is empty.
    pub fn front(&self) -> Option<&T> {
        self.get(self.begin())
    }

    /// Returns the last element of the list, or `None` if the list is empty.
    pub fn back(&self) -> Option<&T> {
        self.get(Position { entry: self.tail })
    }

    /// Returns a mutable reference to the first element, or `None` if the list is empty.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.begin())
    }

    /// Returns a mutable reference to the last element, or `None` if the list is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = Position { entry: self.tail };
        self.get_mut(tail)
    }

    /// Returns an iterator over the list, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::list::LinkedList;
    ///
    /// let list: LinkedList<u32> = vec![1, 2, 3].into_iter().collect();
    /// assert_eq!(list.iter().rev().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
    /// ```
    pub fn iter(&self) -> LinkedListIter<'_, T> {
        LinkedListIter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for LinkedList<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> fmt::Debug for LinkedList<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for LinkedList<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for LinkedList<T> where T: Eq {}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type IntoIter = LinkedListIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        LinkedListIntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T>
where
    T: 'a,
{
    type IntoIter = LinkedListIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `LinkedList<T>`.
pub struct LinkedListIntoIter<T> {
    list: LinkedList<T>,
}

impl<T> Iterator for LinkedListIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for LinkedListIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for LinkedListIntoIter<T> {}

/// An iterator for `LinkedList<T>`.
///
/// This iterator yields immutable references front to back.
pub struct LinkedListIter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<Entry>,
    back: Option<Entry>,
    remaining: usize,
}

impl<'a, T> Iterator for LinkedListIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.arena[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for LinkedListIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.arena[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> ExactSizeIterator for LinkedListIter<'a, T> where T: 'a {}

#[cfg(test)]
mod tests {
    use super::LinkedList;

    #[test]
    fn test_empty() {
        let mut list: LinkedList<u32> = LinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
    }

    #[test]
    fn test_push_pop() {
        let mut list = LinkedList::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), Some(2));
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());
    }

    #[test]
    fn test_insert_before_position() {
        let mut list: LinkedList<u32> = vec![1, 3].into_iter().collect();
        let three = list.next(list.begin());
        let two = list.insert(three, 2);
        assert_eq!(list.get(two), Some(&2));
        assert_eq!(list.prev(three), two);
        assert_eq!(list.iter().cloned().collect::<Vec<u32>>(), vec![1, 2, 3]);

        let begin = list.begin();
        let zero = list.insert(begin, 0);
        assert_eq!(list.begin(), zero);
        assert_eq!(list.front(), Some(&0));
    }

    #[test]
    fn test_erase_returns_next() {
        let mut list: LinkedList<u32> = (0..4).collect();
        let one = list.next(list.begin());
        let (value, next) = list.erase(one);
        assert_eq!(value, 1);
        assert_eq!(list.get(next), Some(&2));

        let last = list.prev(list.end());
        let (value, next) = list.erase(last);
        assert_eq!(value, 3);
        assert!(next.is_end());
        assert_eq!(list.iter().cloned().collect::<Vec<u32>>(), vec![0, 2]);
        assert_eq!(list.back(), Some(&2));
    }

    #[test]
    #[should_panic]
    fn test_erase_end() {
        let mut list: LinkedList<u32> = (0..4).collect();
        let end = list.end();
        list.erase(end);
    }

    #[test]
    #[should_panic]
    fn test_erase_stale_position() {
        let mut list: LinkedList<u32> = (0..4).collect();
        let position = list.prev(list.end());
        list.erase(position);
        list.erase(position);
    }

    #[test]
    fn test_positions_wrap_around_end() {
        let list: LinkedList<u32> = (0..3).collect();
        assert_eq!(list.next(list.end()), list.begin());
        assert!(list.prev(list.begin()).is_end());
        assert_eq!(list.get(list.prev(list.end())), Some(&2));
    }

    #[test]
    fn test_get_mut() {
        let mut list: LinkedList<u32> = (0..3).collect();
        *list.front_mut().unwrap() += 10;
        *list.back_mut().unwrap() += 20;
        let middle = list.next(list.begin());
        *list.get_mut(middle).unwrap() += 30;
        assert_eq!(list.iter().cloned().collect::<Vec<u32>>(), vec![10, 31, 22]);
    }

    #[test]
    fn test_iter_both_ends() {
        let list: LinkedList<u32> = (0..5).collect();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut list: LinkedList<u32> = (0..3).collect();
        let copy = list.clone();
        list.clear();
        list.push_back(9);
        assert_eq!(copy, (0..3).collect::<LinkedList<u32>>());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_swap() {
        let mut a: LinkedList<u32> = (0..3).collect();
        let mut b = LinkedList::new();
        b.push_back(7);
        a.swap(&mut b);
        assert_eq!(a.iter().cloned().collect::<Vec<u32>>(), vec![7]);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn test_into_iter() {
        let list: LinkedList<u32> = (0..4).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.collect::<Vec<u32>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_debug() {
        let list: LinkedList<u32> = (0..3).collect();
        assert_eq!(format!("{:?}", list), "[0, 1, 2]");
    }
}
