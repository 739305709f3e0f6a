//! Action Module
//!
//! A transaction may declare a lifecycle action in the witness right after
//! the last input's witness: `[version byte][action name]`. A missing or
//! unreadable witness is an ordinary transfer, never an error.

mod classifier;


pub use classifier::{classify, parse_action_witness};
