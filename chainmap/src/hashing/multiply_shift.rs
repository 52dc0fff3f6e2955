//! Implementation of the multiply-shift hashing scheme (multiply-add-shift to be precise)
//! from [Dietzfelbinger (1996)] and [Thorup (2015)].
//!
//! Multiply-shift avoids expensive arithmetic operations like modulo and division and instead
//! exploits integer overflow and a bitshift, so the number of buckets is always a power of two.
//!
//! [Dietzfelbinger (1996)]: https://doi.org/10.1007/3-540-60922-9_46
//! [Thorup (2015)]: https://doi.org/10.48550/arXiv.1504.06804

use crate::hashing::common::extract_bits_64;

/// Hashes a 64-bit unsigned integer using the pair-multiply-shift hashing scheme.
///
/// # Parameters
///
/// - `value`: The input value.
/// - `num_bits`: Number of bits in the output hash. Hash range would be equal to `2 ** num_bits`.
/// - `seed`: Random seed.
///
/// # Guarantees
///
/// - Strong universality.
#[inline]
pub const fn pair_multiply_shift(value: u64, num_bits: u32, seed: &[u64; 3]) -> u32 {
    debug_assert!(num_bits <= 32, r#""num_bits" must be <= 32"#);

    let hash_value = seed[0]
        .wrapping_add(value)
        .wrapping_mul(seed[1].wrapping_add(value >> 32))
        .wrapping_add(seed[2]);

    extract_bits_64::<{ u64::BITS }>(hash_value, num_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::common::{num_bits_for_buckets, num_buckets_for_bits};
    use chainmap_testing::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_pair_multiply_shift_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);

        for num_bits in 1..=31 {
            let seed: [u64; 3] = rng.random();
            for value in [0, 1, u64::MAX, i64::MIN as u64, rng.random()] {
                assert!(pair_multiply_shift(value, num_bits, &seed) < num_buckets_for_bits(num_bits));
            }
        }
    }

    #[test]
    #[cfg_attr(not(feature = "_slow-tests"), ignore)]
    fn test_pair_multiply_shift_uniformity() {
        let mut rng = ChaCha20Rng::from_os_rng();
        let num_bits = num_bits_for_buckets(64);

        let aggregation = bucket_uniformity::<ChaCha20Rng, u64>(
            &mut rng,
            &move |rng| {
                let seed: [u64; 3] = rng.random();
                Box::new(move |value: &u64| pair_multiply_shift(*value, num_bits, &seed) as usize)
            },
            num_buckets_for_bits(num_bits) as usize,
            100,
            100,
            0.01,
        );

        assert!(aggregation.outcome, "{:?}", aggregation);
    }
}
