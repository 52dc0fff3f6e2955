//! Data generation utilities useful for testing and benchmarking.
use rand::Rng;
use std::collections::HashSet;
use std::hash::Hash;

/// Provides capabilities to generate random values of the implementer-type.
pub trait Generate<R: Rng>: Sized {
    /// Parameters for data-generation specific for the type.
    type GenerateParams: Default;

    /// Generates a single random value of the type.
    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self;

    /// Generates a slice of **unique** random values of the type.
    ///
    /// # Panics
    ///
    /// - If `params` allow fewer than `size` distinct values.
    fn generate_many(rng: &mut R, params: &Self::GenerateParams, size: usize) -> Box<[Self]>
    where
        Self: Hash + Eq,
    {
        const MAX_TRIALS_PER_VALUE: usize = 999;

        let mut seen = HashSet::new();
        let mut trials = 0;
        while seen.len() < size {
            seen.insert(Self::generate(rng, params));
            trials += 1;
            assert!(
                trials <= size * MAX_TRIALS_PER_VALUE,
                "Unable to generate {} unique values",
                size
            );
        }
        seen.into_iter().collect()
    }
}

/// Parameters for [`Generate`] implementations that generate numeric values.
pub struct NumParams<T> {
    min: T,
    max: T,
}

impl<T> NumParams<T> {
    /// Creates a new instance of [`NumParams`] with the specified minimum and maximum values.
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

macro_rules! impl_generate_num {
    ($($type:ty),*) => {
        $(
            impl Default for NumParams<$type> {
                fn default() -> Self {
                    Self { min: <$type>::MIN, max: <$type>::MAX }
                }
            }

            impl<R: Rng> Generate<R> for $type
            {
                type GenerateParams = NumParams<$type>;

                fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self {
                    rng.random_range(params.min..=params.max)
                }
            }
        )*
    };
}

impl_generate_num!(u8, i8, u16, i16, u32, i32, u64, i64, usize);

impl Default for NumParams<isize> {
    fn default() -> Self {
        Self {
            min: isize::MIN,
            max: isize::MAX,
        }
    }
}

// `isize` has no uniform sampler of its own, it is sampled through `i64`.
impl<R: Rng> Generate<R> for isize {
    type GenerateParams = NumParams<isize>;

    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self {
        rng.random_range(params.min as i64..=params.max as i64) as isize
    }
}
