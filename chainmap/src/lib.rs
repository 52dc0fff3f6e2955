//! A fixed-capacity hash table over integer keys that resolves collisions by separate chaining,
//! together with a line-oriented `put`/`get`/`delete` command front end.
pub mod chained;
pub mod command;
pub mod hashing;

pub use chained::ChainedMap;
pub use chainmap_core::{ChainMapError, HashMap, Hasher};
