//! Scanner Module
//!
//! Index-level enumeration of transaction sources:
//! - `resolve_length`: how many elements a source has, when the only oracle
//!   is "does index i exist"
//! - `find_cells_by_code_hash`: which cells of a source carry a script with a
//!   given code hash
//!
//! Both work in fixed buffers and bounded loops.

mod cells;
mod length;


pub use cells::find_cells_by_code_hash;
pub use length::{LENGTH_SENTINEL, resolve_length, resolve_length_with};
