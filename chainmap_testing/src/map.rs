//! Utilities for testing map implementations.
use crate::generate::{Generate, NumParams};
use chainmap_core::{HashMap, Hasher};
use rand::Rng;
use std::collections::HashMap as ModelMap;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Generates unique keys paired with random values.
pub fn generate_map_data<R: Rng, K: Eq + Hash + Generate<R>, V: Generate<R>>(
    rng: &mut R,
    size: usize,
    key_params: &K::GenerateParams,
    val_params: &V::GenerateParams,
) -> Box<[(K, V)]> {
    let keys = K::generate_many(rng, key_params, size).into_vec();
    keys.into_iter()
        .map(|k| (k, V::generate(rng, val_params)))
        .collect::<Vec<_>>()
        .into_boxed_slice()
}

/// Picks the data size for a key type so that small types do not run out of unique keys.
pub fn map_size_for_bits(bits: u32) -> usize {
    if bits >= u16::BITS {
        4999
    } else {
        (1_usize << bits) / 2
    }
}

/// Tests insertion, retrieval and in-place updates for a given map.
pub fn test_put_get<R, K, H, M>(rng: &mut R, map: &mut M, data: &[(K, i64)])
where
    R: Rng,
    K: Eq + Hash + Copy + Debug + Generate<R>,
    H: Hasher<K>,
    M: HashMap<K, i64, H>,
{
    for (key, val) in data {
        map.put(*key, *val);
    }
    assert_eq!(map.len(), data.len());

    for (key, val) in data {
        assert_eq!(map.get(key), Some(*val), "Key: {:?}", key);
    }

    // Overwrite every other key, the rest must keep their values.
    for (key, val) in data.iter().step_by(2) {
        map.put(*key, val.wrapping_add(1));
    }
    assert_eq!(map.len(), data.len());

    for (i, (key, val)) in data.iter().enumerate() {
        let expected = if i % 2 == 0 { val.wrapping_add(1) } else { *val };
        assert_eq!(map.get(key), Some(expected), "Key: {:?}", key);
    }

    let keys: HashSet<&K> = data.iter().map(|(k, _)| k).collect();
    let params = <K as Generate<R>>::GenerateParams::default();
    for _ in 0..data.len().div_ceil(3) {
        let key = K::generate(rng, &params);
        if !keys.contains(&key) {
            assert_eq!(map.get(&key), None, "Key: {:?}", key);
        }
    }
}

/// Tests deletion for a given map that already holds `data`.
pub fn test_delete<K, H, M>(map: &mut M, data: &[(K, i64)])
where
    K: Eq + Copy + Debug,
    H: Hasher<K>,
    M: HashMap<K, i64, H>,
{
    let (removed, kept) = data.split_at(data.len() / 2);

    for (key, val) in removed {
        assert_eq!(map.delete(key), Some(*val), "Key: {:?}", key);
        assert_eq!(map.get(key), None, "Key: {:?}", key);
        assert_eq!(map.delete(key), None, "Key: {:?}", key);
    }
    assert_eq!(map.len(), kept.len());

    for (key, val) in kept {
        assert_eq!(map.get(key), Some(*val), "Key: {:?}", key);
    }
}

/// A single randomly generated map operation.
#[derive(Debug, Clone, Copy)]
pub enum Op<K> {
    Put(K, i64),
    Get(K),
    Delete(K),
}

/// Generates `size` operations over a pool of `num_keys` distinct keys.
///
/// A small pool relative to `size` makes updates and repeated deletions frequent.
pub fn generate_ops<R, K>(rng: &mut R, num_keys: usize, size: usize) -> Vec<Op<K>>
where
    R: Rng,
    K: Eq + Hash + Copy + Generate<R>,
{
    let keys = K::generate_many(rng, &<K as Generate<R>>::GenerateParams::default(), num_keys);
    let val_params = NumParams::<i64>::default();

    (0..size)
        .map(|_| {
            let key = keys[rng.random_range(0..keys.len())];
            match rng.random_range(0..3) {
                0 => Op::Put(key, i64::generate(rng, &val_params)),
                1 => Op::Get(key),
                _ => Op::Delete(key),
            }
        })
        .collect()
}

/// Runs `ops` against a map and [`std::collections::HashMap`] and asserts they agree after
/// every operation.
pub fn test_against_model<K, H, M>(map: &mut M, ops: &[Op<K>])
where
    K: Eq + Hash + Copy + Debug,
    H: Hasher<K>,
    M: HashMap<K, i64, H>,
{
    let mut model = ModelMap::new();

    for (i, op) in ops.iter().enumerate() {
        match *op {
            Op::Put(key, val) => {
                map.put(key, val);
                model.insert(key, val);
            }
            Op::Get(key) => {
                assert_eq!(map.get(&key), model.get(&key).copied(), "Op #{}: {:?}", i, op);
            }
            Op::Delete(key) => {
                assert_eq!(map.delete(&key), model.remove(&key), "Op #{}: {:?}", i, op);
            }
        }
        assert_eq!(map.len(), model.len(), "Op #{}: {:?}", i, op);
        assert_eq!(map.is_empty(), model.is_empty(), "Op #{}: {:?}", i, op);
    }

    for (key, val) in &model {
        assert_eq!(map.get(key), Some(*val), "Key: {:?}", key);
    }
}

/// Generates tests for a map type for a single integer key type.
#[macro_export]
macro_rules! generate_map_int_tests {
    ($Map:ident, $Hasher:ident, $factory:expr, $type:ty) => {
        compose_idents::compose_idents!(test_fn = [test_put_get_, $type], {
            #[test]
            fn test_fn() {
                use rand::SeedableRng;
                use rand_chacha::ChaCha20Rng;
                use $crate::*;

                let mut rng = ChaCha20Rng::from_os_rng();
                let map_size = map_size_for_bits(<$type>::BITS);
                let data = generate_map_data::<_, $type, i64>(
                    &mut rng,
                    map_size,
                    &NumParams::<$type>::default(),
                    &NumParams::<i64>::default(),
                );
                let mut map: $Map<$type, i64, $Hasher<$type>> =
                    $factory((map_size / 4).max(1) as i64);
                test_put_get(&mut rng, &mut map, &data);
            }
        });

        compose_idents::compose_idents!(test_fn = [test_delete_, $type], {
            #[test]
            fn test_fn() {
                use rand::SeedableRng;
                use rand_chacha::ChaCha20Rng;
                use $crate::*;

                let mut rng = ChaCha20Rng::from_os_rng();
                let map_size = map_size_for_bits(<$type>::BITS);
                let data = generate_map_data::<_, $type, i64>(
                    &mut rng,
                    map_size,
                    &NumParams::<$type>::default(),
                    &NumParams::<i64>::default(),
                );
                let mut map: $Map<$type, i64, $Hasher<$type>> =
                    $factory((map_size / 4).max(1) as i64);
                for (key, val) in data.iter() {
                    chainmap_core::HashMap::put(&mut map, *key, *val);
                }
                test_delete(&mut map, &data);
            }
        });

        compose_idents::compose_idents!(test_fn = [test_against_model_, $type], {
            #[test]
            fn test_fn() {
                use rand::SeedableRng;
                use rand_chacha::ChaCha20Rng;
                use $crate::*;

                let mut rng = ChaCha20Rng::from_os_rng();
                let num_keys = map_size_for_bits(<$type>::BITS).min(64);
                let ops = generate_ops::<_, $type>(&mut rng, num_keys, 5000);
                let mut map: $Map<$type, i64, $Hasher<$type>> = $factory(8);
                test_against_model(&mut map, &ops);
            }
        });
    };
}

/// Generates tests of special cases for a map type for integer keys.
#[macro_export]
macro_rules! generate_map_int_special_tests {
    ($Map:ident, $Hasher:ident, $factory:expr, $($type:ty),*) => {
        $(
            compose_idents::compose_idents!(test_fn = [test_extreme_keys_, $type], {
                #[test]
                fn test_fn() {
                    use chainmap_core::HashMap;

                    let mut map: $Map<$type, i64, $Hasher<$type>> = $factory(3);
                    let keys = [<$type>::MIN, <$type>::MAX, <$type>::MAX / 2, 1 as $type];

                    for (i, key) in keys.iter().enumerate() {
                        map.put(*key, i as i64);
                    }
                    for (i, key) in keys.iter().enumerate() {
                        assert_eq!(map.get(key), Some(i as i64), "Key: {:?}", key);
                    }
                    assert_eq!(map.delete(&<$type>::MIN), Some(0));
                    assert_eq!(map.get(&<$type>::MIN), None);
                    assert_eq!(map.get(&<$type>::MAX), Some(1));
                    assert_eq!(map.len(), keys.len() - 1);
                }
            });
        )*
    };
}

/// Generates the complete suite of tests for a map type over all supported integer key types.
#[macro_export]
macro_rules! generate_map_tests {
    ($Map:ident, $Hasher:ident, $factory:expr) => {
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, u8);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, i8);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, u16);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, i16);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, u32);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, i32);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, u64);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, i64);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, usize);
        $crate::generate_map_int_tests!($Map, $Hasher, $factory, isize);
        $crate::generate_map_int_special_tests!(
            $Map, $Hasher, $factory, u8, i8, u16, i16, u32, i32, u64, i64, usize, isize
        );
    };
}
