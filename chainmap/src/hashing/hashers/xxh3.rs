//! Implements [`Hasher`] for all primitive integers using the XXH3 hash function.

use crate::hashing::common::{extract_bits_64, num_bits_for_buckets, num_buckets_for_bits};
use chainmap_core::Hasher;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use xxhash_rust::xxh3::xxh3_64_with_seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XXH3State {
    num_bits: u32,
    seed: u64,
}

impl Default for XXH3State {
    fn default() -> Self {
        Self {
            num_bits: 1,
            seed: 0,
        }
    }
}

impl XXH3State {
    pub fn from_seed(seed: u64, num_buckets: u32) -> Self {
        debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);
        let num_bits = num_bits_for_buckets(num_buckets);
        debug_assert!(
            (1..=31).contains(&num_bits),
            r#""num_bits" must be [1, 31]"#
        );
        Self { num_bits, seed }
    }
}

#[inline]
fn hash(state: &XXH3State, value: u64) -> u32 {
    let bytes = value.to_le_bytes();
    let hash_value = xxh3_64_with_seed(bytes.as_slice(), state.seed);

    extract_bits_64::<{ u64::BITS }>(hash_value, state.num_bits)
}

/// Hasher based on the XXH3 algorithm.
pub struct XXH3Hasher<T> {
    state: XXH3State,
    key_type: PhantomData<T>,
}

impl<T> Clone for XXH3Hasher<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for XXH3Hasher<T> {}

impl<T> Default for XXH3Hasher<T> {
    fn default() -> Self {
        Self {
            state: XXH3State::default(),
            key_type: PhantomData,
        }
    }
}

impl<T> Debug for XXH3Hasher<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XXH3Hasher")
            .field("state", &self.state)
            .finish()
    }
}

macro_rules! impl_xxh3_int {
    ($($int_type:ty),*) => {
        $(
            impl Hasher<$int_type> for XXH3Hasher<$int_type> {
                type State = XXH3State;

                fn make_state(seed: u64, num_buckets: u32) -> Self::State {
                    XXH3State::from_seed(seed, num_buckets)
                }
                fn from_seed(seed: u64, num_buckets: u32) -> Self {
                    Self::from_state(Self::make_state(seed, num_buckets))
                }
                fn from_state(state: Self::State) -> Self {
                    Self { state, key_type: PhantomData }
                }
                fn state(&self) -> &Self::State {
                    &self.state
                }
                fn num_buckets(&self) -> u32 {
                    num_buckets_for_bits(self.state.num_bits)
                }
                fn hash(&self, value: &$int_type) -> u32 {
                    hash(&self.state, *value as u64)
                }
            }
        )*
    };
}

impl_xxh3_int!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);

#[cfg(test)]
mod tests {
    use super::*;
    use chainmap_testing::generate_hasher_tests;

    generate_hasher_tests!(XXH3Hasher, u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);
}
