//! Implements [`HashMap`] for [`ChainedMap`].
use crate::chained::{ChainedMap, Entry};
use chainmap_core::{HashMap, Hasher};

impl<K: Eq, V: Copy, H: Hasher<K>> HashMap<K, V, H> for ChainedMap<K, V, H> {
    fn put(&mut self, key: K, value: V) {
        let bucket_idx = self.bucket_of(&key);

        let mut cursor = self.buckets[bucket_idx];
        while let Some(slot_idx) = cursor {
            let entry = self.entry_mut(slot_idx);
            if entry.key == key {
                entry.value = value;
                return;
            }
            cursor = entry.next;
        }

        let next = self.buckets[bucket_idx];
        let slot_idx = self.allocate(Entry { key, value, next });
        self.buckets[bucket_idx] = Some(slot_idx);
        self.len += 1;
    }

    fn get(&self, key: &K) -> Option<V> {
        self.chain(self.bucket_of(key))
            .find(|entry| entry.key == *key)
            .map(|entry| entry.value)
    }

    fn delete(&mut self, key: &K) -> Option<V> {
        let bucket_idx = self.bucket_of(key);

        let mut prev: Option<usize> = None;
        let mut cursor = self.buckets[bucket_idx];
        while let Some(slot_idx) = cursor {
            let entry = self.entry(slot_idx);
            let next = entry.next;

            if entry.key == *key {
                match prev {
                    None => self.buckets[bucket_idx] = next,
                    Some(prev_idx) => self.entry_mut(prev_idx).next = next,
                }
                self.len -= 1;
                return Some(self.release(slot_idx).value);
            }

            prev = cursor;
            cursor = next;
        }

        None
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    fn num_collisions(&self) -> usize {
        (0..self.buckets.len())
            .map(|bucket_idx| self.chain_len(bucket_idx).saturating_sub(1))
            .sum()
    }
}
