//! Implements [`Hasher`] for all primitive integers using the Euclidean remainder.

use crate::hashing::common::reduce_mod;
use chainmap_core::Hasher;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuloState {
    num_buckets: u32,
}

impl Default for ModuloState {
    fn default() -> Self {
        Self { num_buckets: 1 }
    }
}

impl ModuloState {
    pub fn from_seed(_seed: u64, num_buckets: u32) -> Self {
        debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

        Self {
            num_buckets: num_buckets.max(1),
        }
    }
}

/// Deterministic hasher that maps a key to `key mod num_buckets`.
///
/// The seed is ignored. Keys are widened to `i128` first, so negative keys of any width are
/// reduced into the bucket range without overflow.
pub struct ModuloHasher<T> {
    state: ModuloState,
    key_type: PhantomData<T>,
}

impl<T> Clone for ModuloHasher<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ModuloHasher<T> {}

impl<T> Default for ModuloHasher<T> {
    fn default() -> Self {
        Self {
            state: ModuloState::default(),
            key_type: PhantomData,
        }
    }
}

impl<T> Debug for ModuloHasher<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuloHasher")
            .field("state", &self.state)
            .finish()
    }
}

macro_rules! impl_modulo_int {
    ($($int_type:ty),*) => {
        $(
            impl Hasher<$int_type> for ModuloHasher<$int_type> {
                type State = ModuloState;

                fn make_state(seed: u64, num_buckets: u32) -> Self::State {
                    ModuloState::from_seed(seed, num_buckets)
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
                    self.state.num_buckets
                }
                #[inline]
                fn hash(&self, value: &$int_type) -> u32 {
                    reduce_mod(*value as i128, self.state.num_buckets)
                }
            }
        )*
    };
}

impl_modulo_int!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);
