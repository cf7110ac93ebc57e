use super::TreeMap;
use crate::raw::RawTreeMap;

impl<K, V> TreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before the node
    /// arena reallocates.
    ///
    /// Slots released by [`remove`](TreeMap::remove) are reused, so a map whose size stays
    /// under `capacity` never reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let map: TreeMap<i32, i32> = TreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TreeMap {
            raw: RawTreeMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::with_capacity(4);
    /// let capacity = map.capacity();
    /// for key in 0..4 {
    ///     map.insert(key, key)?;
    /// }
    /// map.remove(&0)?;
    /// map.insert(4, 4)?;
    /// assert_eq!(map.capacity(), capacity);
    /// # Ok::<(), treemap::TreeMapError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
