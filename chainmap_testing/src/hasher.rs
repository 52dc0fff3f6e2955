//! Test drivers shared by all [`chainmap_core::Hasher`] implementations.
use crate::generate::Generate;
use chainmap_core::Hasher;
use rand::Rng;
use std::fmt::Debug;

/// Checks that `hasher` reduces every key into `[0, num_buckets)` and does so deterministically.
pub fn test_hasher_range<R, K, H>(rng: &mut R, hasher: &H, extremes: &[K], num_keys: usize)
where
    R: Rng,
    K: Eq + Debug + Generate<R>,
    H: Hasher<K>,
{
    let num_buckets = hasher.num_buckets();
    assert!(num_buckets > 0);

    let params = <K as Generate<R>>::GenerateParams::default();
    let random_keys: Vec<K> = (0..num_keys).map(|_| K::generate(rng, &params)).collect();

    for key in extremes.iter().chain(random_keys.iter()) {
        let hash = hasher.hash(key);
        assert!(
            hash < num_buckets,
            "Key {:?} hashed to {} with {} buckets",
            key,
            hash,
            num_buckets
        );
        assert_eq!(hash, hasher.hash(key), "Key: {:?}", key);
    }
}

/// Checks that a hasher rebuilt from the state of another one hashes identically.
pub fn test_hasher_state_roundtrip<R, K, H>(rng: &mut R, hasher: &H, num_keys: usize)
where
    R: Rng,
    K: Eq + Debug + Generate<R>,
    H: Hasher<K>,
{
    let rebuilt = H::from_state(hasher.state().clone());
    assert_eq!(rebuilt.num_buckets(), hasher.num_buckets());

    let params = <K as Generate<R>>::GenerateParams::default();
    for _ in 0..num_keys {
        let key = K::generate(rng, &params);
        assert_eq!(rebuilt.hash(&key), hasher.hash(&key), "Key: {:?}", key);
    }
}

/// Generates standard test cases for a hasher over the given integer key types.
///
/// This macro generates test functions that verify:
/// - Hash values stay within the bucket range for random and extreme keys, for several bucket
///   counts.
/// - Hashers rebuilt from a state are equivalent to the original ones.
///
/// # Example
///
/// ```ignore
/// generate_hasher_tests!(ModuloHasher, i32, u64);
/// ```
#[macro_export]
macro_rules! generate_hasher_tests {
    ($Hasher:ident, $($type:ty),* $(,)?) => {
        $(
            compose_idents::compose_idents!(test_fn = [test_hasher_range_, $type], {
                #[test]
                fn test_fn() {
                    use chainmap_core::Hasher;
                    use rand::{RngCore, SeedableRng};
                    use rand_chacha::ChaCha20Rng;

                    let mut rng = ChaCha20Rng::from_os_rng();
                    let extremes = [
                        <$type>::MIN,
                        <$type>::MAX,
                        0 as $type,
                        1 as $type,
                        (0 as $type).wrapping_sub(1),
                    ];

                    for num_buckets in [1_u32, 2, 3, 7, 8, 1000, 1 << 16, (1 << 20) + 1] {
                        let hasher = <$Hasher<$type>>::from_seed(rng.next_u64(), num_buckets);
                        assert!(hasher.num_buckets() >= num_buckets);
                        $crate::test_hasher_range(&mut rng, &hasher, &extremes, 999);
                    }
                }
            });

            compose_idents::compose_idents!(test_fn = [test_hasher_state_roundtrip_, $type], {
                #[test]
                fn test_fn() {
                    use chainmap_core::Hasher;
                    use rand::{RngCore, SeedableRng};
                    use rand_chacha::ChaCha20Rng;

                    let mut rng = ChaCha20Rng::from_os_rng();
                    let hasher = <$Hasher<$type>>::from_seed(rng.next_u64(), 1000);
                    $crate::test_hasher_state_roundtrip(&mut rng, &hasher, 999);
                }
            });
        )*
    };
}
