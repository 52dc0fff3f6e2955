//! Hash functions and [`chainmap_core::Hasher`] implementations that reduce integer keys into
//! bucket indices.
pub mod common;
pub mod hashers;
pub mod multiply_shift;
