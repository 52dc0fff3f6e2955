//! [`chainmap_core::Hasher`] implementations for primitive integer keys.
//!
//! # Notes
//!
//! - [`ModuloHasher`] is the default reduction: it works for any positive number of buckets.
//! - [`MaskHasher`] and [`MultiplyShiftHasher`] round the number of buckets up to a power of two.
//! - A table never mixes reductions, the hasher is part of its type.
mod modulo;
pub use modulo::*;
mod mask;
pub use mask::*;
mod multiply_shift;
pub use multiply_shift::*;
#[cfg(feature = "xxh3")]
mod xxh3;
#[cfg(feature = "xxh3")]
pub use xxh3::*;
