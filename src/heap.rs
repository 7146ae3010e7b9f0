//! Binary heap stored in a vector.

use crate::compare::{Comparator, Natural};
use log::debug;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::slice;
use std::vec::Vec;

/// A priority queue implemented using an implicit binary tree laid out in a vector.
///
/// The heap keeps the element that no other element goes after at the top, so with the default
/// `Natural` comparator it is a max-heap and with `Reverse` it is a min-heap. Pushing and popping
/// take `O(log N)` time, and building a heap from `N` elements takes `O(N)` time.
///
/// # Examples
///
/// ```
/// use dsl_collections::heap::BinaryHeap;
///
/// let mut heap = BinaryHeap::new();
/// heap.push(3);
/// heap.push(7);
/// heap.push(5);
///
/// assert_eq!(heap.peek(), Some(&7));
/// assert_eq!(heap.pop(), Some(7));
/// assert_eq!(heap.pop(), Some(5));
/// assert_eq!(heap.len(), 1);
/// ```
pub struct BinaryHeap<T, C = Natural> {
    data: Vec<T>,
    comparator: C,
}

impl<T> BinaryHeap<T> {
    /// Constructs a new, empty max-heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::heap::BinaryHeap;
    ///
    /// let heap: BinaryHeap<u32> = BinaryHeap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C> BinaryHeap<T, C> {
    /// Constructs a new, empty heap ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::compare::Reverse;
    /// use dsl_collections::heap::BinaryHeap;
    ///
    /// let mut heap = BinaryHeap::with_comparator(Reverse);
    /// heap.push(3);
    /// heap.push(1);
    /// assert_eq!(heap.peek(), Some(&1));
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        BinaryHeap {
            data: Vec::new(),
            comparator,
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes all elements from the heap.
    pub fn clear(&mut self) {
        debug!("clearing binary heap with {} elements", self.data.len());
        self.data.clear();
    }

    /// Returns the top of the heap, or `None` if the heap is empty.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Returns an iterator over the elements of the heap in arbitrary order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Consumes the heap and returns its elements in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T, C> BinaryHeap<T, C>
where
    C: Comparator<T>,
{
    /// Builds a heap out of `data`, ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::compare::Natural;
    /// use dsl_collections::heap::BinaryHeap;
    ///
    /// let heap = BinaryHeap::from_vec(vec![2, 9, 4], Natural);
    /// assert_eq!(heap.peek(), Some(&9));
    /// ```
    pub fn from_vec(data: Vec<T>, comparator: C) -> Self {
        let mut heap = BinaryHeap { data, comparator };
        for index in (0..heap.len() / 2).rev() {
            heap.sift_down(index);
        }
        heap
    }

    fn goes_after(&self, a: usize, b: usize) -> bool {
        self.comparator.less(&self.data[b], &self.data[a])
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.goes_after(index, parent) {
                break;
            }
            self.data.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.len();
        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < len && self.goes_after(right, left) {
                best = right;
            }
            if !self.goes_after(best, index) {
                break;
            }
            self.data.swap(index, best);
            index = best;
        }
    }

    /// Pushes a value onto the heap.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        let last = self.len() - 1;
        self.sift_up(last);
    }

    /// Removes the top of the heap and returns it. Returns `None` if the heap is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::heap::BinaryHeap;
    ///
    /// let mut heap = BinaryHeap::new();
    /// heap.push(1);
    /// assert_eq!(heap.pop(), Some(1));
    /// assert_eq!(heap.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        let mut top = self.data.pop()?;
        if !self.data.is_empty() {
            mem::swap(&mut top, &mut self.data[0]);
            self.sift_down(0);
        }
        Some(top)
    }

    /// Consumes the heap and returns its elements sorted so that each element goes before the
    /// next one, the top of the heap being last.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::heap::BinaryHeap;
    ///
    /// let heap: BinaryHeap<u32> = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3]);
    /// ```
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut ret = Vec::with_capacity(self.len());
        while let Some(value) = self.pop() {
            ret.push(value);
        }
        ret.reverse();
        ret
    }
}

impl<T> Default for BinaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> Clone for BinaryHeap<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        BinaryHeap {
            data: self.data.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T, C> fmt::Debug for BinaryHeap<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T, C> Extend<T> for BinaryHeap<T, C>
where
    C: Comparator<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for BinaryHeap<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        BinaryHeap::from_vec(iter.into_iter().collect(), Natural)
    }
}
