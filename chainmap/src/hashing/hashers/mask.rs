//! Implements [`Hasher`] for all primitive integers by masking the low bits of the key.

use crate::hashing::common::{num_bits_for_buckets, num_buckets_for_bits, reduce_mask};
use chainmap_core::Hasher;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MaskState {
    num_bits: u32,
}

impl MaskState {
    pub fn from_seed(_seed: u64, num_buckets: u32) -> Self {
        debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);
        let num_bits = num_bits_for_buckets(num_buckets);

        debug_assert!(
            (1..=31).contains(&num_bits),
            r#""num_bits" must be [1, 31]"#
        );

        Self { num_bits }
    }
}

/// Deterministic hasher that keeps the low `num_bits` bits of the key's two's-complement
/// representation.
///
/// The number of buckets is rounded up to a power of two. Keys that differ only above the mask
/// always collide, so this hasher suits dense key ranges rather than adversarial ones.
pub struct MaskHasher<T> {
    state: MaskState,
    key_type: PhantomData<T>,
}

impl<T> Clone for MaskHasher<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MaskHasher<T> {}

impl<T> Default for MaskHasher<T> {
    fn default() -> Self {
        Self {
            state: MaskState::default(),
            key_type: PhantomData,
        }
    }
}

impl<T> Debug for MaskHasher<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskHasher")
            .field("state", &self.state)
            .finish()
    }
}

macro_rules! impl_mask_int {
    ($($int_type:ty),*) => {
        $(
            impl Hasher<$int_type> for MaskHasher<$int_type> {
                type State = MaskState;

                fn make_state(seed: u64, num_buckets: u32) -> Self::State {
                    MaskState::from_seed(seed, num_buckets)
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
                #[inline]
                fn hash(&self, value: &$int_type) -> u32 {
                    reduce_mask(*value as u64, num_buckets_for_bits(self.state.num_bits))
                }
            }
        )*
    };
}

impl_mask_int!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);

#[cfg(test)]
mod tests {
    use super::*;
    use chainmap_testing::generate_hasher_tests;

    generate_hasher_tests!(MaskHasher, u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);

    #[test]
    fn test_mask_hasher_rounds_to_power_of_two() {
        assert_eq!(MaskHasher::<i32>::from_seed(0, 1).num_buckets(), 2);
        assert_eq!(MaskHasher::<i32>::from_seed(0, 5).num_buckets(), 8);
        assert_eq!(MaskHasher::<i32>::from_seed(0, 1 << 16).num_buckets(), 1 << 16);
    }

    #[test]
    fn test_mask_hasher_low_bits() {
        let hasher = MaskHasher::<i32>::from_seed(0, 1 << 16);
        assert_eq!(hasher.hash(&0x1_2345), 0x2345);
        assert_eq!(hasher.hash(&-1), 0xFFFF);
        assert_eq!(hasher.hash(&i32::MIN), 0);
    }
}
