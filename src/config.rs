//! Settings: schema types plus loading from file and environment.
//!
//! Every section has defaults, so a missing or partial `config.toml` is fine.

mod load;
mod schema;

pub use schema::*;
