//! Domain types for the plant catalog.

pub mod plant;

pub use plant::{parse_price, NewPlant, Plant};
