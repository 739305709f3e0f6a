//! Amount Module
//!
//! Conservation of the token amount across the running script's group:
//! the first 16 bytes of every group cell's data are a little-endian `u128`.

mod conservation;


pub use conservation::{GroupSums, compute_group_sums};
