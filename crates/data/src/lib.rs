//! Loading of catalog configuration and item data from disk.

mod error;
pub mod load;

pub use error::*;
pub use load::*;
