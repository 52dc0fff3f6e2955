//! The implementation of a bucketed hash table that resolves collisions by separate chaining.
//!
//! Chains are singly-linked lists threaded through an index-based slab, so a bucket stores the
//! slot index of its head and every entry stores the slot index of its successor.
mod core;
pub use self::core::*;
mod ctors;
mod hash_map;
mod iter;
pub use iter::*;
