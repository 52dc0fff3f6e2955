//! Implements [`Hasher`] for all primitive integers using [`pair_multiply_shift`].
//!
//! Keys are sign-extended (or zero-extended) to `u64` first, so every key width shares one state.

use crate::hashing::common::{num_bits_for_buckets, num_buckets_for_bits};
use crate::hashing::multiply_shift::pair_multiply_shift;
use chainmap_core::Hasher;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyShiftState {
    num_bits: u32,
    seed: [u64; 3],
}

impl Default for MultiplyShiftState {
    fn default() -> Self {
        Self {
            num_bits: 1,
            seed: [0; 3],
        }
    }
}

impl MultiplyShiftState {
    pub fn from_seed(seed: u64, num_buckets: u32) -> Self {
        debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let seed: [u64; 3] = rng.random();
        let num_bits = num_bits_for_buckets(num_buckets);

        debug_assert!(
            (1..=31).contains(&num_bits),
            r#""num_bits" must be [1, 31]"#
        );

        Self { num_bits, seed }
    }
}

/// Seeded hasher providing strong universality guarantees.
///
/// Unlike [`super::ModuloHasher`] and [`super::MaskHasher`] it spreads structured key sets
/// (arithmetic progressions, keys sharing low bits) evenly, at the cost of rounding the number
/// of buckets up to a power of two.
pub struct MultiplyShiftHasher<T> {
    state: MultiplyShiftState,
    key_type: PhantomData<T>,
}

impl<T> Clone for MultiplyShiftHasher<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MultiplyShiftHasher<T> {}

impl<T> Default for MultiplyShiftHasher<T> {
    fn default() -> Self {
        Self {
            state: MultiplyShiftState::default(),
            key_type: PhantomData,
        }
    }
}

impl<T> Debug for MultiplyShiftHasher<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiplyShiftHasher")
            .field("state", &self.state)
            .finish()
    }
}

macro_rules! impl_multiply_shift_int {
    ($($int_type:ty),*) => {
        $(
            impl Hasher<$int_type> for MultiplyShiftHasher<$int_type> {
                type State = MultiplyShiftState;

                fn make_state(seed: u64, num_buckets: u32) -> Self::State {
                    MultiplyShiftState::from_seed(seed, num_buckets)
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
                    pair_multiply_shift(*value as u64, self.state.num_bits, &self.state.seed)
                }
            }
        )*
    };
}

impl_multiply_shift_int!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);

#[cfg(test)]
mod tests {
    use super::*;
    use chainmap_testing::*;
    use rand::RngCore;
    use rand_chacha::ChaCha20Rng;

    generate_hasher_tests!(
        MultiplyShiftHasher,
        u8,
        i8,
        u16,
        i16,
        u32,
        i32,
        u64,
        i64,
        usize,
        isize
    );

    #[test]
    fn test_multiply_shift_hasher_depends_on_seed() {
        let a = MultiplyShiftHasher::<i64>::from_seed(1, 1 << 10);
        let b = MultiplyShiftHasher::<i64>::from_seed(2, 1 << 10);
        let c = MultiplyShiftHasher::<i64>::from_seed(1, 1 << 10);

        assert_ne!(a.state(), b.state());
        assert_eq!(a.state(), c.state());
        assert!((0..1000_i64).any(|k| a.hash(&k) != b.hash(&k)));
    }

    #[test]
    #[cfg_attr(not(feature = "_slow-tests"), ignore)]
    fn test_multiply_shift_hasher_spreads_arithmetic_progressions() {
        let mut rng = ChaCha20Rng::from_os_rng();

        let aggregation = bucket_uniformity::<ChaCha20Rng, i64>(
            &mut rng,
            &|rng| {
                let hasher = MultiplyShiftHasher::<i64>::from_seed(rng.next_u64(), 64);
                // Keys sharing their low bits collide under masking but not here.
                Box::new(move |value: &i64| hasher.hash(&value.wrapping_mul(1 << 16)) as usize)
            },
            64,
            100,
            100,
            0.01,
        );

        assert!(aggregation.outcome, "{:?}", aggregation);
    }
}
