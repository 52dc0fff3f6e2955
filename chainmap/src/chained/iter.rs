//! Iterators over the chains and entries of a [`ChainedMap`].
use crate::chained::{ChainedMap, Entry, Slot};
use chainmap_core::Hasher;
use std::iter::FusedIterator;

/// Walks a single chain from its head, yielding entries in chain order.
pub(crate) struct Chain<'a, K, V> {
    slots: &'a [Slot<K, V>],
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot_idx = self.cursor?;
        match &self.slots[slot_idx] {
            Slot::Occupied(entry) => {
                self.cursor = entry.next;
                Some(entry)
            }
            Slot::Vacant { .. } => unreachable!("vacant slot {} is linked into a chain", slot_idx),
        }
    }
}

impl<K, V> FusedIterator for Chain<'_, K, V> {}

/// An iterator over the entries of a [`ChainedMap`], yielding copies of keys and values.
///
/// Buckets are visited in index order and each chain from head to tail.
pub struct Iter<'a, K, V> {
    slots: &'a [Slot<K, V>],
    buckets: std::slice::Iter<'a, Option<usize>>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<K: Copy, V: Copy> Iterator for Iter<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot_idx) = self.cursor {
                let Slot::Occupied(entry) = &self.slots[slot_idx] else {
                    unreachable!("vacant slot {} is linked into a chain", slot_idx)
                };
                self.cursor = entry.next;
                self.remaining -= 1;
                return Some((entry.key, entry.value));
            }
            self.cursor = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Copy, V: Copy> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: Copy, V: Copy> FusedIterator for Iter<'_, K, V> {}

impl<K: Eq, V, H: Hasher<K>> ChainedMap<K, V, H> {
    pub(crate) fn chain(&self, bucket_idx: usize) -> Chain<'_, K, V> {
        Chain {
            slots: &self.slots,
            cursor: self.buckets[bucket_idx],
        }
    }

    /// Iterate over copies of all key-value pairs.
    pub fn iter(&self) -> Iter<'_, K, V>
    where
        K: Copy,
        V: Copy,
    {
        Iter {
            slots: &self.slots,
            buckets: self.buckets.iter(),
            cursor: None,
            remaining: self.len,
        }
    }
}

impl<'a, K: Eq + Copy, V: Copy, H: Hasher<K>> IntoIterator for &'a ChainedMap<K, V, H> {
    type Item = (K, V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
