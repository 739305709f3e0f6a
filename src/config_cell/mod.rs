//! Config Cell Module
//!
//! The config cell is a singleton cell dep holding a type-indexed table of the
//! identifying hashes of every other well-known cell kind. Its payload is a
//! version byte followed by a vector of `Bytes`, where element `k` is
//! `[4-byte header == k][value]`.

mod resolver;

#[cfg(test)]
mod tests;

pub use resolver::{ConfigEntry, ConfigResolver, parse_config_table};
