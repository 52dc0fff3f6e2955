mod core;
pub use self::core::*;
pub mod error;
pub use error::ChainMapError;
