//! Hash map with a fixed number of buckets.

use log::{debug, trace};
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::{Flatten, FromIterator};
use std::slice;
use std::vec::{self, Vec};

const DEFAULT_BUCKET_COUNT: usize = 64;

/// The location of an entry inside a `HashMap`, as returned by `HashMap::find`.
///
/// A slot is invalidated by any removal from the same bucket and by `clear`. Using an
/// invalidated slot with `erase` panics.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Slot {
    bucket: usize,
    index: usize,
    generation: u64,
}

/// A hash map implemented with a fixed array of buckets.
///
/// A key is hashed to one of the buckets, and each bucket is a vector of key-value pairs that is
/// scanned linearly. The number of buckets is chosen at construction and never changes, so the
/// map should be created with roughly as many buckets as it is expected to hold entries.
///
/// Inserting a key that is already present leaves the existing value in place.
///
/// # Examples
///
/// ```
/// use dsl_collections::hashmap::HashMap;
///
/// let mut map = HashMap::new();
/// assert!(map.insert("a", 1));
/// assert!(!map.insert("a", 2));
///
/// assert_eq!(map.get(&"a"), Some(&1));
/// assert_eq!(map.len(), 1);
///
/// *map.get_mut(&"a").unwrap() += 1;
/// assert_eq!(map.remove(&"a"), Some(2));
/// assert!(map.is_empty());
/// ```
pub struct HashMap<K, V, S = RandomState> {
    buckets: Vec<Vec<(K, V)>>,
    // bumped on every removal from the matching bucket
    generations: Vec<u64>,
    len: usize,
    hash_builder: S,
}

impl<K, V> HashMap<K, V> {
    /// Constructs a new, empty `HashMap<K, V>` with a default number of buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::hashmap::HashMap;
    ///
    /// let map: HashMap<u32, u32> = HashMap::new();
    /// assert_eq!(map.bucket_count(), 64);
    /// ```
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Constructs a new, empty `HashMap<K, V>` with `bucket_count` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn with_buckets(bucket_count: usize) -> Self {
        Self::with_buckets_and_hasher(bucket_count, RandomState::new())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Constructs a new, empty map with `bucket_count` buckets that hashes keys with
    /// `hash_builder`.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::hashmap::HashMap;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let mut map = HashMap::with_buckets_and_hasher(8, RandomState::new());
    /// map.insert(1, 1);
    /// ```
    pub fn with_buckets_and_hasher(bucket_count: usize, hash_builder: S) -> Self {
        assert!(bucket_count > 0, "Error: bucket count must be positive.");
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Vec::new);
        debug!("created hash map with {} buckets", bucket_count);
        HashMap {
            buckets,
            generations: vec![0; bucket_count],
            len: 0,
            hash_builder,
        }
    }

    /// Returns the number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every entry, keeping the buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::hashmap::HashMap;
    ///
    /// let mut map = HashMap::with_buckets(4);
    /// map.insert(1, 1);
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.bucket_count(), 4);
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing hash map with {} entries", self.len);
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        for generation in &mut self.generations {
            *generation += 1;
        }
        self.len = 0;
    }

    /// Returns the entry stored at `slot`, or `None` if the slot is out of date.
    pub fn slot(&self, slot: Slot) -> Option<(&K, &V)> {
        if !self.is_current(slot) {
            return None;
        }
        self.buckets[slot.bucket]
            .get(slot.index)
            .map(|(key, value)| (key, value))
    }

    fn is_current(&self, slot: Slot) -> bool {
        self.generations.get(slot.bucket) == Some(&slot.generation)
    }

    /// Removes the entry stored at `slot` and returns it. The last entry of the same bucket
    /// takes the place of the removed one.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not reference an entry, or if an entry of the same bucket was removed
    /// after `slot` was obtained.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::hashmap::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, "one");
    /// let slot = map.find(&1).unwrap();
    /// assert_eq!(map.erase(slot), (1, "one"));
    /// assert!(map.is_empty());
    /// ```
    pub fn erase(&mut self, slot: Slot) -> (K, V) {
        assert!(
            self.is_current(slot),
            "Error: attempting to erase through a stale slot.",
        );
        let bucket = &mut self.buckets[slot.bucket];
        assert!(
            slot.index < bucket.len(),
            "Error: attempting to erase a vacant slot.",
        );
        self.generations[slot.bucket] += 1;
        self.len -= 1;
        bucket.swap_remove(slot.index)
    }

    /// Returns an iterator over the map. Entries are yielded bucket by bucket, which appears
    /// random.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::hashmap::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 4);
    ///
    /// let mut pairs = map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>();
    /// pairs.sort();
    /// assert_eq!(pairs, vec![(1, 1), (2, 4)]);
    /// ```
    pub fn iter(&self) -> HashMapIter<'_, K, V> {
        HashMapIter {
            buckets: self.buckets.iter(),
            entries: None,
            remaining: self.len,
        }
    }

    /// Returns a mutable iterator over the map, in the same order as `iter`.
    pub fn iter_mut(&mut self) -> HashMapIterMut<'_, K, V> {
        HashMapIterMut {
            buckets: self.buckets.iter_mut(),
            entries: None,
            remaining: self.len,
        }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        let mut hasher = self.hash_builder.build_hasher();
        key.hash(&mut hasher);
        (hasher.finish() % self.buckets.len() as u64) as usize
    }

    /// Inserts a key-value pair into the map. If the key already exists the map is left
    /// untouched and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_collections::hashmap::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert!(map.insert(1, 1));
    /// assert!(!map.insert(1, 2));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let index = self.bucket_of(&key);
        let bucket = &mut self.buckets[index];
        trace!("inserting into bucket {} holding {} entries", index, bucket.len());
        if bucket.iter().any(|(other, _)| *other == key) {
            return false;
        }
        bucket.push((key, value));
        self.len += 1;
        true
    }

    /// Returns the slot holding `key`, or `None` if the key does not exist.
    pub fn find<Q>(&self, key: &Q) -> Option<Slot>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_of(key);
        self.buckets[bucket]
            .iter()
            .position(|(other, _)| Borrow::<Q>::borrow(other) == key)
            .map(|index| Slot {
                bucket,
                index,
                generation: self.generations[bucket],
            })
    }

    /// Checks if a key exists in the map.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a key, or `None` if the key
    /// does not exist.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.find(key)?;
        Some(&self.buckets[slot.bucket][slot.index].1)
    }

    /// Returns a mutable reference to the value associated with a key, or `None` if the key does
    /// not exist.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.find(key)?;
        Some(&mut self.buckets[slot.bucket][slot.index].1)
    }

    /// Removes a key from the map and returns its value, or `None` if the key does not exist.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.find(key)?;
        Some(self.erase(slot).1)
    }
}

impl<K, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Clone for HashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        HashMap {
            buckets: self.buckets.clone(),
            generations: self.generations.clone(),
            len: self.len,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, V, S> fmt::Debug for HashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashMap<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = HashMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type IntoIter = HashMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        HashMapIntoIter {
            remaining: self.len,
            entries: self.buckets.into_iter().flatten(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = HashMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `HashMap<K, V, S>`.
///
/// This iterator yields immutable references to the keys and values, bucket by bucket.
pub struct HashMapIter<'a, K, V> {
    buckets: slice::Iter<'a, Vec<(K, V)>>,
    entries: Option<slice::Iter<'a, (K, V)>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for HashMapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entries) = &mut self.entries {
                if let Some((key, value)) = entries.next() {
                    self.remaining -= 1;
                    return Some((key, value));
                }
            }
            // skip to the next bucket, which may be empty
            self.entries = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for HashMapIter<'a, K, V> {}

/// A mutable iterator for `HashMap<K, V, S>`.
///
/// This iterator yields immutable references to the keys and mutable references to the values.
pub struct HashMapIterMut<'a, K, V> {
    buckets: slice::IterMut<'a, Vec<(K, V)>>,
    entries: Option<slice::IterMut<'a, (K, V)>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for HashMapIterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entries) = &mut self.entries {
                if let Some((key, value)) = entries.next() {
                    self.remaining -= 1;
                    return Some((&*key, value));
                }
            }
            self.entries = Some(self.buckets.next()?.iter_mut());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for HashMapIterMut<'a, K, V> {}

/// An owning iterator for `HashMap<K, V, S>`.
pub struct HashMapIntoIter<K, V> {
    entries: Flatten<vec::IntoIter<Vec<(K, V)>>>,
    remaining: usize,
}

impl<K, V> Iterator for HashMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for HashMapIntoIter<K, V> {}
