//! API Module
//!
//! This module exposes the validators over JSON-RPC 2.0, so that wallets and
//! indexers can check a transaction before submitting it to the chain.

mod server;


pub use server::Server;
