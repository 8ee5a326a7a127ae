//! The public ordered-map type (`spec.md` §6).

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::error::MapError;
use crate::iter::{Iter, Keys, Values};
use crate::raw::RawTable;

/// An insertion-order-preserving map from `K` to `V`.
///
/// Lookup, insertion, update and deletion are expected O(1) amortized,
/// backed by a Swiss-table-style open-addressed index with a parallel
/// control-byte array (see the crate's module docs). Iteration
/// (`iter`/`keys`/`values`) visits live entries in the order they were most
/// recently inserted; replacing a value does not move its key
/// (`spec.md` P3–P5).
pub struct OrderedMap<K, V, S = RandomState> {
    raw: RawTable<K, V, S>,
}

impl<K, V> OrderedMap<K, V, RandomState> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty map that can hold at least `capacity` entries
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V> Default for OrderedMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates an empty map using a custom [`BuildHasher`].
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty map with the given capacity and [`BuildHasher`].
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        OrderedMap {
            raw: RawTable::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Current slot-table capacity (always a power of two `>= 16`).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// The map's hasher factory.
    pub fn hasher(&self) -> &S {
        self.raw.hasher()
    }

    /// An iterator over `(&K, &V)` pairs in insertion order. Each item is
    /// `Err(MapError::MutatedDuringIteration)` once, the step after a
    /// structural mutation is observed; the iterator is exhausted after
    /// that (`spec.md` S6).
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter::new(&self.raw)
    }

    /// An iterator over keys in insertion order. See [`Self::iter`] for the
    /// mutation-detection contract.
    pub fn keys(&self) -> Keys<'_, K, V, S> {
        Keys::new(&self.raw)
    }

    /// An iterator over values in insertion order. See [`Self::iter`] for
    /// the mutation-detection contract.
    pub fn values(&self) -> Values<'_, K, V, S> {
        Values::new(&self.raw)
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Looks up `key`. Does not mutate the map or affect iteration order.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.contains_key(key)
    }

    /// Inserts `value` for `key`. If `key` was already present, its value
    /// is replaced in place (same order position, `spec.md` P5) and the old
    /// value is returned; otherwise `key` is appended at the end of the
    /// iteration order (`spec.md` P3/P4) and `Ok(None)` is returned.
    ///
    /// Fails with [`MapError::OutOfMemory`] if growing the table was
    /// necessary and allocation failed; the map is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, MapError> {
        self.raw.insert(key, value)
    }

    /// Removes `key`, returning its value, or
    /// [`MapError::NotFound`] if it was absent. A key re-inserted later
    /// takes a new, latest order position (`spec.md` P4).
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.remove(key)
    }
}

impl<K, V, S> fmt::Debug for OrderedMap<K, V, S>
where
    K: fmt::Debug + Hash + Eq,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_map();
        for item in self.iter() {
            match item {
                Ok((k, v)) => {
                    dbg.entry(k, v);
                }
                Err(_) => break,
            }
        }
        dbg.finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = Result<(&'a K, &'a V), MapError>;
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Iter<'a, K, V, S> {
        self.iter()
    }
}
