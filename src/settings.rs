//! Configuration loader and schema types.

mod load;
mod schema;

pub use schema::*;
