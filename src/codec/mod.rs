//! Codec Module
//!
//! The binary layout of cell data, scripts and witnesses is molecule. Scripts
//! and byte vectors use the readers and builders from `ckb-gen-types`; the
//! governance membership record is defined here on molecule's traits.
//!
//! Every span must pass `verify` (or `from_slice` / `from_compatible_slice`)
//! before its accessors are used. Verification failures are reported as
//! [`CodecError`].

mod builder;
mod governance_members;

#[cfg(test)]
mod tests;

use molecule::error::VerificationError;
use thiserror::Error;

pub use builder::{build_config_cell_data, build_governance_members, build_script, pack_byte32, pack_bytes};
pub use ckb_gen_types::packed::{Bytes, BytesReader, BytesVec, BytesVecReader, Script, ScriptReader};
pub use governance_members::{GovernanceMembers, GovernanceMembersBuilder, GovernanceMembersReader};
pub use molecule::NUMBER_SIZE;

/// Where the code hash starts in a serialized three-field script.
pub const SCRIPT_CODE_HASH_OFFSET: usize = NUMBER_SIZE * 4;
/// Where the hash type byte sits in a serialized three-field script.
pub const SCRIPT_HASH_TYPE_OFFSET: usize = SCRIPT_CODE_HASH_OFFSET + 32;

/// Why a span failed verification or lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("span too short for its header")]
    Header,
    #[error("declared total size does not match span length")]
    TotalSize,
    #[error("offset directory is malformed")]
    Offset,
    #[error("unexpected field count")]
    FieldCount,
    #[error("unknown union item")]
    UnknownItem,
    #[error("item index out of bound")]
    IndexOutOfBound,
    #[error("self-check header {actual} does not match slot {expected}")]
    HeaderMismatch { expected: u32, actual: u32 },
}

impl From<VerificationError> for CodecError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::HeaderIsBroken(..) => CodecError::Header,
            VerificationError::TotalSizeNotMatch(..) => CodecError::TotalSize,
            VerificationError::OffsetsNotMatch(..) => CodecError::Offset,
            VerificationError::FieldCountNotMatch(..) => CodecError::FieldCount,
            VerificationError::UnknownItem(..) => CodecError::UnknownItem,
        }
    }
}
