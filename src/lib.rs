//! Validation logic for a governed user-defined token: the token extension
//! check, owner authorization through governance member cells, and action
//! classification, together with the binary codec, cell scanners and config
//! cell lookups they are built from.

pub mod types; // Shared constants, catalogs and the error taxonomy.
pub mod codec; // Verification, navigation and building of the binary layout.
pub mod tx; // Host data access and the JSON-described mock transaction.
pub mod scanner; // List length probing and bounded cell scans.
pub mod config_cell; // Slot lookups in the singleton config cell.
pub mod amount; // Group amount sums.
pub mod action; // Action witness classification.
pub mod governance; // Owner authorization.
pub mod validation; // Validator entry points and exit codes.
pub mod api; // JSON-RPC surface.
pub mod config; // Service configuration.

// Re-export commonly used types and configurations for easier access.
pub use types::*;
pub use config::Config;
pub use validation::{ExtensionContext, Validator, exit_code};
