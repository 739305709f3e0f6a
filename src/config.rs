//! Configuration Module
//!
//! This module defines the configuration structures for the validator service.
//! Configuration is loaded from TOML files and parsed using serde.

use anyhow::Context;
use serde::Deserialize;
use std::fs;

use crate::types::{Byte32, byte32_from_hex};

/// Type id of the config cell on mainnet.
pub const MAINNET_CONFIG_CELL_TYPE_ID: &str =
    "470452746a7abdb1f1723c5bd10d8b5bcda0dc4f00881cb9c6d8cf84b697d475";
/// Type id of the config cell on testnet.
pub const TESTNET_CONFIG_CELL_TYPE_ID: &str =
    "1fa21d5beb92fdf044f27f6310564be88f59e32557abf44d0db30bc239e14ff3";

/// Main configuration structure
///
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [network]
/// kind = "mainnet"
///
/// [api]
/// host = "127.0.0.1"
/// port = 8114
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub api: ApiConfig,
}

/// Deployment target of the token contracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Mainnet,
    Testnet,
}

/// Network configuration
///
/// # Fields
/// - `kind`: Which built-in config cell type id to use
/// - `config_cell_type_id`: Optional hex override, for devnets and local chains
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub kind: NetworkKind,
    #[serde(default)]
    pub config_cell_type_id: Option<String>,
}

impl NetworkConfig {
    /// Effective config cell type id: the override if set, else the network constant.
    pub fn config_cell_type_id(&self) -> anyhow::Result<Byte32> {
        let value = match (&self.config_cell_type_id, self.kind) {
            (Some(custom), _) => custom.as_str(),
            (None, NetworkKind::Mainnet) => MAINNET_CONFIG_CELL_TYPE_ID,
            (None, NetworkKind::Testnet) => TESTNET_CONFIG_CELL_TYPE_ID,
        };
        byte32_from_hex(value).with_context(|| format!("invalid config cell type id {value:?}"))
    }
}

/// API server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: Port number to listen on
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
