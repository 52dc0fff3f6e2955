//! Declares core types for [`ChainedMap`].
use crate::hashing::hashers::ModuloHasher;
use chainmap_core::Hasher;
use std::fmt::{Debug, Formatter};

/// Fixed-capacity hash table based on separate chaining.
///
/// # Guarantees
///
/// - Average O(1 + α) time for `put`, `get` and `delete`, where α is the load factor.
/// - At most one entry per key.
/// - The number of buckets is fixed at construction, entries are never rehashed.
/// - New keys are inserted at the head of their chain, updates happen in place.
///
/// # Examples
///
/// ```rust
/// use chainmap::{ChainedMap, HashMap};
///
/// let mut scores = ChainedMap::<i64, i64>::new(16).unwrap();
/// scores.put(1, 100);
/// scores.put(2, 200);
///
/// assert_eq!(scores.get(&1), Some(100));
/// assert_eq!(scores.delete(&1), Some(100));
/// assert_eq!(scores.get(&1), None);
/// assert_eq!(scores.get(&2), Some(200));
/// ```
pub struct ChainedMap<K: Eq, V, H: Hasher<K> = ModuloHasher<K>> {
    pub(crate) hasher: H,
    /// Slot index of the head of each chain.
    pub(crate) buckets: Box<[Option<usize>]>,
    pub(crate) slots: Vec<Slot<K, V>>,
    /// Head of the list of vacant slots available for reuse.
    pub(crate) free_head: Option<usize>,
    pub(crate) len: usize,
}

/// A key-value pair linked into a bucket chain.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub key: K,
    pub value: V,
    pub next: Option<usize>,
}

/// A slot of the slab backing all chains of a [`ChainedMap`].
#[derive(Debug)]
pub(crate) enum Slot<K, V> {
    Occupied(Entry<K, V>),
    Vacant { next_free: Option<usize> },
}

impl<K: Eq, V, H: Hasher<K>> ChainedMap<K, V, H> {
    /// Get the index of the bucket `key` belongs to.
    #[inline]
    pub fn bucket_of(&self, key: &K) -> usize {
        self.hasher.hash(key) as usize
    }

    /// Get the number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Get the hasher used to pick buckets.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Check whether an entry for `key` exists.
    pub fn contains_key(&self, key: &K) -> bool {
        self.chain(self.bucket_of(key)).any(|entry| entry.key == *key)
    }

    /// Get the number of entries chained in the given bucket.
    ///
    /// Buckets at or past [`ChainedMap::num_buckets`] hold no entries and yield `0`.
    pub fn chain_len(&self, bucket_idx: usize) -> usize {
        if bucket_idx >= self.buckets.len() {
            return 0;
        }
        self.chain(bucket_idx).count()
    }

    /// Remove all entries, keeping the buckets.
    pub fn clear(&mut self) {
        self.buckets.fill(None);
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }

    pub(crate) fn entry(&self, slot_idx: usize) -> &Entry<K, V> {
        match &self.slots[slot_idx] {
            Slot::Occupied(entry) => entry,
            Slot::Vacant { .. } => unreachable!("vacant slot {} is linked into a chain", slot_idx),
        }
    }

    pub(crate) fn entry_mut(&mut self, slot_idx: usize) -> &mut Entry<K, V> {
        match &mut self.slots[slot_idx] {
            Slot::Occupied(entry) => entry,
            Slot::Vacant { .. } => unreachable!("vacant slot {} is linked into a chain", slot_idx),
        }
    }

    /// Store `entry` in a vacant slot, reusing a released one when possible.
    pub(crate) fn allocate(&mut self, entry: Entry<K, V>) -> usize {
        match self.free_head {
            Some(slot_idx) => {
                let Slot::Vacant { next_free } = &self.slots[slot_idx] else {
                    unreachable!("occupied slot {} is on the free list", slot_idx)
                };
                self.free_head = *next_free;
                self.slots[slot_idx] = Slot::Occupied(entry);
                slot_idx
            }
            None => {
                self.slots.push(Slot::Occupied(entry));
                self.slots.len() - 1
            }
        }
    }

    /// Vacate the slot of an already unlinked entry and return the entry.
    pub(crate) fn release(&mut self, slot_idx: usize) -> Entry<K, V> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        self.free_head = Some(slot_idx);
        match std::mem::replace(&mut self.slots[slot_idx], vacant) {
            Slot::Occupied(entry) => entry,
            Slot::Vacant { .. } => unreachable!("slot {} released twice", slot_idx),
        }
    }
}

impl<K, V, H> Debug for ChainedMap<K, V, H>
where
    K: Eq + Copy + Debug,
    V: Copy + Debug,
    H: Hasher<K> + Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        struct Entries<'a, K: Eq, V, H: Hasher<K>>(&'a ChainedMap<K, V, H>);

        impl<K, V, H> Debug for Entries<'_, K, V, H>
        where
            K: Eq + Copy + Debug,
            V: Copy + Debug,
            H: Hasher<K>,
        {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.debug_map().entries(self.0.iter()).finish()
            }
        }

        f.debug_struct("ChainedMap")
            .field("hasher", &self.hasher)
            .field("num_buckets", &self.buckets.len())
            .field("len", &self.len)
            .field("entries", &Entries(self))
            .finish()
    }
}
