use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::error::{Result, TreeMapError};
use crate::raw::{RawTreeMap, Side};

mod capacity;

/// An ordered map based on an unbalanced [binary search tree].
///
/// Given a key type with a [total order], a tree map stores each key at most once and
/// can answer, in addition to exact lookups, which stored key is nearest to a query from
/// below ([`floor_key`](TreeMap::floor_key)) or from above
/// ([`ceil_key`](TreeMap::ceil_key)).
///
/// Unlike [`BTreeMap`], every refused operation is reported as a [`TreeMapError`]:
/// inserting a key that is already present fails with
/// [`DuplicateKey`](TreeMapError::DuplicateKey) instead of overwriting, and querying an
/// empty map fails with [`EmptyContainer`](TreeMapError::EmptyContainer).
///
/// It is a logic error for a key to be modified in such a way that the key's ordering
/// relative to any other key, as determined by the [`Ord`] trait, changes while it is in
/// the map. The behavior resulting from such a logic error is not specified, but will be
/// encapsulated to the `TreeMap` that observed the logic error and not result in undefined
/// behavior.
///
/// # Examples
///
/// ```
/// use treemap::{TreeMap, TreeMapError};
///
/// let mut map = TreeMap::new();
/// map.insert(10, 'A')?;
/// map.insert(8, 'B')?;
/// map.insert(12, 'C')?;
///
/// assert_eq!(map.len(), 3);
/// assert_eq!(map.min_key()?, &8);
/// assert_eq!(map.max_key()?, &12);
///
/// assert_eq!(map.floor_key(&13)?, &12);
/// assert_eq!(map.floor_key(&7), Err(TreeMapError::NoFloorExists));
/// assert_eq!(map.ceil_key(&7)?, &8);
/// assert_eq!(map.ceil_key(&13), Err(TreeMapError::NoCeilExists));
///
/// assert_eq!(map.remove(&10)?, 'A');
/// assert_eq!(map.get(&10), Err(TreeMapError::KeyNotFound));
/// # Ok::<(), TreeMapError>(())
/// ```
///
/// # Background
///
/// The tree is never rebalanced. Its shape is fixed by the order in which keys were
/// inserted: random insertion orders give O(log n) expected depth, while sorted
/// insertion degenerates into a linked list of depth n. Every traversal is iterative, so
/// a degenerate tree is slow but never overflows the stack.
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`BTreeMap`]: alloc::collections::BTreeMap
pub struct TreeMap<K, V> {
    raw: RawTreeMap<K, V>,
}

impl<K, V> TreeMap<K, V> {
    /// Makes a new, empty `TreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a")?;
    /// # Ok::<(), treemap::TreeMapError>(())
    /// ```
    #[must_use]
    pub const fn new() -> TreeMap<K, V> {
        TreeMap { raw: RawTreeMap::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// a.insert(1, "a")?;
    /// a.clear();
    /// assert!(a.is_empty());
    /// # Ok::<(), treemap::TreeMapError>(())
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a")?;
    /// assert_eq!(a.len(), 1);
    /// # Ok::<(), treemap::TreeMapError>(())
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a")?;
    /// assert!(!a.is_empty());
    /// # Ok::<(), treemap::TreeMapError>(())
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes on the longest path from the root to a leaf, or `0`
    /// for an empty map.
    ///
    /// This is an extension that exposes the tree's shape, which depends only on
    /// insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut sorted = TreeMap::new();
    /// let mut shuffled = TreeMap::new();
    /// for key in [1, 2, 3, 4, 5, 6, 7] {
    ///     sorted.insert(key, ())?;
    /// }
    /// for key in [4, 2, 6, 1, 3, 5, 7] {
    ///     shuffled.insert(key, ())?;
    /// }
    /// assert_eq!(sorted.height(), 7);
    /// assert_eq!(shuffled.height(), 3);
    /// # Ok::<(), treemap::TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns `true` if any entry of the map holds a value equal to `value`.
    ///
    /// Always `false` for an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert!(!map.contains_value(&'A'));
    /// map.insert(1, 'A')?;
    /// assert!(map.contains_value(&'A'));
    /// assert!(!map.contains_value(&'B'));
    /// # Ok::<(), treemap::TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.raw.contains_value(value)
    }

    /// Returns the smallest key in the map.
    ///
    /// # Errors
    ///
    /// [`TreeMapError::EmptyContainer`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, TreeMapError};
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.min_key(), Err(TreeMapError::EmptyContainer));
    /// map.insert(23, 'A')?;
    /// map.insert(42, 'B')?;
    /// assert_eq!(map.min_key()?, &23);
    /// # Ok::<(), TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) on average, O(n) worst case.
    pub fn min_key(&self) -> Result<&K> {
        self.raw.extreme_key(Side::Left).ok_or(TreeMapError::EmptyContainer)
    }

    /// Returns the largest key in the map.
    ///
    /// # Errors
    ///
    /// [`TreeMapError::EmptyContainer`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, TreeMapError};
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.max_key(), Err(TreeMapError::EmptyContainer));
    /// map.insert(23, 'A')?;
    /// map.insert(42, 'B')?;
    /// assert_eq!(map.max_key()?, &42);
    /// # Ok::<(), TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) on average, O(n) worst case.
    pub fn max_key(&self) -> Result<&K> {
        self.raw.extreme_key(Side::Right).ok_or(TreeMapError::EmptyContainer)
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Errors
    ///
    /// - [`TreeMapError::EmptyContainer`] if the map is empty.
    /// - [`TreeMapError::KeyNotFound`] if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, TreeMapError};
    ///
    /// let mut map: TreeMap<i32, &str> = TreeMap::new();
    /// assert_eq!(map.get(&1), Err(TreeMapError::EmptyContainer));
    /// map.insert(1, "a")?;
    /// assert_eq!(map.get(&1), Ok(&"a"));
    /// assert_eq!(map.get(&2), Err(TreeMapError::KeyNotFound));
    /// # Ok::<(), TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) on average, O(n) worst case.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(TreeMapError::EmptyContainer);
        }
        self.raw.get(key).ok_or(TreeMapError::KeyNotFound)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map: TreeMap<i32, &str> = TreeMap::new();
    /// assert!(!map.contains_key(&1));
    /// map.insert(1, "a")?;
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// # Ok::<(), treemap::TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) on average, O(n) worst case.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// The new entry becomes a leaf of the tree; nothing is rebalanced.
    ///
    /// # Errors
    ///
    /// [`TreeMapError::DuplicateKey`] if the key is already present. The existing value
    /// is kept and the map is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, TreeMapError};
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert(37, "a"), Ok(()));
    /// assert_eq!(map.insert(37, "b"), Err(TreeMapError::DuplicateKey));
    /// assert_eq!(map[&37], "a");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) on average, O(n) worst case.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.raw.insert(key, value).map_err(|_| TreeMapError::DuplicateKey)
    }

    /// Removes a key from the map, returning the value that was stored for it.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Errors
    ///
    /// - [`TreeMapError::EmptyContainer`] if the map is empty.
    /// - [`TreeMapError::KeyNotFound`] if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, TreeMapError};
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a")?;
    /// map.insert(2, "b")?;
    /// assert_eq!(map.remove(&1), Ok("a"));
    /// assert_eq!(map.remove(&1), Err(TreeMapError::KeyNotFound));
    /// assert_eq!(map.remove(&2), Ok("b"));
    /// assert_eq!(map.remove(&2), Err(TreeMapError::EmptyContainer));
    /// # Ok::<(), TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) on average, O(n) worst case.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(TreeMapError::EmptyContainer);
        }
        self.raw.remove(key).map(|(_, value)| value).ok_or(TreeMapError::KeyNotFound)
    }

    /// Returns the greatest key in the map that is less than or equal to `key`.
    ///
    /// If `key` itself is present, the stored key equal to it is returned.
    ///
    /// # Errors
    ///
    /// - [`TreeMapError::EmptyContainer`] if the map is empty.
    /// - [`TreeMapError::NoFloorExists`] if every key in the map is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, TreeMapError};
    ///
    /// let mut map: TreeMap<i32, char> = TreeMap::new();
    /// assert_eq!(map.floor_key(&10), Err(TreeMapError::EmptyContainer));
    /// map.insert(10, 'A')?;
    /// map.insert(8, 'B')?;
    /// map.insert(12, 'C')?;
    /// assert_eq!(map.floor_key(&13), Ok(&12));
    /// assert_eq!(map.floor_key(&10), Ok(&10));
    /// assert_eq!(map.floor_key(&9), Ok(&8));
    /// assert_eq!(map.floor_key(&7), Err(TreeMapError::NoFloorExists));
    /// # Ok::<(), TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) on average, O(n) worst case.
    pub fn floor_key<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(TreeMapError::EmptyContainer);
        }
        self.raw.nearest_key(key, Side::Left).ok_or(TreeMapError::NoFloorExists)
    }

    /// Returns the least key in the map that is greater than or equal to `key`.
    ///
    /// If `key` itself is present, the stored key equal to it is returned.
    ///
    /// # Errors
    ///
    /// - [`TreeMapError::EmptyContainer`] if the map is empty.
    /// - [`TreeMapError::NoCeilExists`] if every key in the map is less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::{TreeMap, TreeMapError};
    ///
    /// let mut map: TreeMap<i32, char> = TreeMap::new();
    /// assert_eq!(map.ceil_key(&10), Err(TreeMapError::EmptyContainer));
    /// map.insert(10, 'A')?;
    /// map.insert(8, 'B')?;
    /// map.insert(12, 'C')?;
    /// assert_eq!(map.ceil_key(&7), Ok(&8));
    /// assert_eq!(map.ceil_key(&10), Ok(&10));
    /// assert_eq!(map.ceil_key(&11), Ok(&12));
    /// assert_eq!(map.ceil_key(&13), Err(TreeMapError::NoCeilExists));
    /// # Ok::<(), TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) on average, O(n) worst case.
    pub fn ceil_key<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(TreeMapError::EmptyContainer);
        }
        self.raw.nearest_key(key, Side::Right).ok_or(TreeMapError::NoCeilExists)
    }
}

impl<K: Clone, V: Clone> Clone for TreeMap<K, V> {
    fn clone(&self) -> Self {
        TreeMap { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.raw.for_each_in_order(|key, value| {
            map.entry(key, value);
        });
        map.finish()
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        TreeMap::new()
    }
}

impl<K, Q, V> Index<&Q> for TreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `TreeMap`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.raw.get(key).expect("key not found in TreeMap")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn debug_lists_entries_in_key_order() {
        let mut map = TreeMap::new();
        for key in [5, 1, 9, 3] {
            map.insert(key, key * 2).unwrap();
        }
        assert_eq!(format!("{map:?}"), "{1: 2, 3: 6, 5: 10, 9: 18}");
        assert_eq!(format!("{:?}", TreeMap::<u8, u8>::new()), "{}");
    }

    #[test]
    fn clone_is_independent() {
        let mut original = TreeMap::new();
        for key in [2, 1, 3] {
            original.insert(key, key).unwrap();
        }
        let copy = original.clone();
        original.remove(&2).unwrap();

        assert_eq!(copy.len(), 3);
        assert_eq!(copy.get(&2), Ok(&2));
        assert_eq!(copy.height(), 2);
        copy.raw.assert_invariants();
        original.raw.assert_invariants();
    }

    #[test]
    #[should_panic(expected = "key not found in TreeMap")]
    fn index_missing_key_panics() {
        let map: TreeMap<i32, i32> = TreeMap::new();
        let _ = map[&1];
    }

    #[test]
    fn failed_operations_leave_map_untouched() {
        let mut map = TreeMap::new();
        for key in [4, 2, 6] {
            map.insert(key, key).unwrap();
        }

        assert_eq!(map.insert(2, 20), Err(TreeMapError::DuplicateKey));
        assert_eq!(map.remove(&5), Err(TreeMapError::KeyNotFound));
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&2), Ok(&2));
        map.raw.assert_invariants();
    }
}
