//! Catalog pipeline: text resolution, normalization, ordering, filtering and
//! sorting of item records. Keep this crate free of IO and platform concerns.

pub mod card;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod item;
pub mod order;
pub mod sort;
pub mod text;

pub use card::*;
pub use catalog::*;
pub use config::*;
pub use filter::*;
pub use item::*;
pub use order::*;
pub use sort::*;
pub use text::*;
