//! Governance Module
//!
//! Authorization of the token's owner role. A transaction may act as the
//! owner only if one of its inputs is locked by the omni lock with exactly the
//! lock args recorded in the governance member cell.
//!
//! # Flow
//! 1. Resolve the governance member cell type id from the config cell and find
//!    exactly one governance member cell in the cell deps
//! 2. Resolve the omni lock type id and find the omni-lock inputs
//! 3. Decode the governance membership record (version 0 only)
//! 4. Accept on the first omni-lock input whose args equal the record's lock args

mod authorize;
mod members;


pub use authorize::authorize_owner;
pub use members::parse_governance_data;
