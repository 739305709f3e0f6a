use molecule::error::VerificationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::CodecError;

/// Hard upper bound on cells inspected by a single scan.
pub const MAX_CELL_NUM: usize = 256;
/// Scratch buffer for cell fields and cell data.
pub const TMP_SIZE: usize = 32768;
/// Buffer for the action witness.
pub const TMP_SIZE_SHORT: usize = 1024;
pub const HASH_SIZE: usize = 32;
pub const TYPE_ID_SIZE: usize = 32;
/// Expected length of the extension args (the token id).
pub const TOKEN_ID_LEN: usize = 20;
pub const U128_BYTES: usize = 16;
pub const GOVERNANCE_CELL_CURRENT_VERSION: u8 = 0;
pub const CONFIG_CELL_CURRENT_VERSION: u8 = 0;

/// 32-byte identifying hash (code hash / type id).
pub type Byte32 = [u8; HASH_SIZE];

/// Decodes a 64-character hex hash, with or without a `0x` prefix.
pub fn byte32_from_hex(value: &str) -> Result<Byte32, hex::FromHexError> {
    let mut out = [0u8; HASH_SIZE];
    hex::decode_to_slice(value.strip_prefix("0x").unwrap_or(value), &mut out)?;
    Ok(out)
}

/// Origin of a cell lookup inside the transaction being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Input,
    Output,
    CellDep,
    GroupInput,
    GroupOutput,
}

/// Projection of a cell that can be loaded independently of its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellField {
    /// Capacity as 8 little-endian bytes.
    Capacity,
    /// Serialized lock script.
    Lock,
    /// Serialized type script, missing when the cell has none.
    Type,
}

/// How a script's code hash is interpreted. The discriminant is the wire byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ScriptHashType {
    Data = 0,
    #[default]
    Type = 1,
    Data1 = 2,
    Data2 = 4,
}

impl ScriptHashType {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Lifecycle action declared by the transaction's action witness.
///
/// Ordinals are part of the wire contract and must never be reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    DeployConfig,
    UpdateConfig,
    InitGovernance,
    UpdateOwner,
    UpdateCustodians,
    UpdateMerchants,
    DeployToken,
    RequestMint,
    ConfirmMint,
    RejectMint,
    RequestBurn,
    ConfirmBurn,
    RejectBurn,
    #[default]
    Others,
}

/// Action name catalog, indexed by ordinal.
pub const ACTIONS: [(Action, &str); 14] = [
    (Action::DeployConfig, "deploy_config"),
    (Action::UpdateConfig, "update_config"),
    (Action::InitGovernance, "init_governance"),
    (Action::UpdateOwner, "update_owner"),
    (Action::UpdateCustodians, "update_custodians"),
    (Action::UpdateMerchants, "update_merchants"),
    (Action::DeployToken, "deploy_token"),
    (Action::RequestMint, "request_mint"),
    (Action::ConfirmMint, "confirm_mint"),
    (Action::RejectMint, "reject_mint"),
    (Action::RequestBurn, "request_burn"),
    (Action::ConfirmBurn, "confirm_burn"),
    (Action::RejectBurn, "reject_burn"),
    (Action::Others, "Others"),
];

impl Action {
    /// Looks up an action by its exact wire name; first match in catalog order wins.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        ACTIONS
            .iter()
            .find(|(_, candidate)| candidate.as_bytes() == name)
            .map(|(action, _)| *action)
    }

    pub fn name(self) -> &'static str {
        ACTIONS[self as usize].1
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Slot of the config cell's type-indexed table.
///
/// Each element of the table carries its own ordinal as a 4-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u32)]
pub enum ConfigSlot {
    SystemStatus = 0,
    GovernanceMemberCellTypeId = 1,
    GovernanceMemberTypeArgs = 2,
    TickCellTypeId = 3,
    TickTypeArgs = 4,
    XudtInfoCellTypeId = 5,
    XudtInfoTypeArgs = 6,
    XudtCellTypeId = 7,
    XudtTypeArgs = 8,
    AlwaysSuccessTypeId = 9,
    AlwaysSuccessTypeArgs = 10,
    OmniLockTypeId = 11,
    OmniLockTypeArgs = 12,
    XudtExtensionTypeId = 13,
    XudtExtensionTypeArgs = 14,
    XudtOwnerTypeId = 15,
    XudtOwnerTypeArgs = 16,
}

impl ConfigSlot {
    pub const ALL: [ConfigSlot; 17] = [
        ConfigSlot::SystemStatus,
        ConfigSlot::GovernanceMemberCellTypeId,
        ConfigSlot::GovernanceMemberTypeArgs,
        ConfigSlot::TickCellTypeId,
        ConfigSlot::TickTypeArgs,
        ConfigSlot::XudtInfoCellTypeId,
        ConfigSlot::XudtInfoTypeArgs,
        ConfigSlot::XudtCellTypeId,
        ConfigSlot::XudtTypeArgs,
        ConfigSlot::AlwaysSuccessTypeId,
        ConfigSlot::AlwaysSuccessTypeArgs,
        ConfigSlot::OmniLockTypeId,
        ConfigSlot::OmniLockTypeArgs,
        ConfigSlot::XudtExtensionTypeId,
        ConfigSlot::XudtExtensionTypeArgs,
        ConfigSlot::XudtOwnerTypeId,
        ConfigSlot::XudtOwnerTypeArgs,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for ConfigSlot {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        ConfigSlot::ALL.get(value as usize).copied().ok_or(value)
    }
}

/// Outcome of a data-access call other than a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SysError {
    #[error("index out of bound")]
    IndexOutOfBound,
    #[error("item missing")]
    ItemMissing,
    /// Carries the actual length of the item that did not fit.
    #[error("buffer too small, item is {0} bytes")]
    LengthNotEnough(usize),
    #[error("item encoding error")]
    Encoding,
}

/// Rejection reasons. Every variant maps to exactly one exit code, see [`ValidationError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid arguments length")]
    ArgumentsLength,
    #[error("malformed payload: {0}")]
    Encoding(#[from] CodecError),
    #[error("data access failed: {0}")]
    Syscall(SysError),
    #[error("item exceeds buffer capacity ({actual} bytes)")]
    ScriptTooLong { actual: usize },
    #[error("amount overflow")]
    Overflow,
    #[error("invalid amount")]
    Amount,
    #[error("input amount {input} differs from output amount {output} without owner mode")]
    OwnerModeRequired { input: u128, output: u128 },
    #[error("token id mismatch")]
    TokenIdMismatch,
    #[error("token id must be {expected} bytes, got {got}")]
    TokenIdSize { expected: usize, got: usize },
    #[error("expected exactly one governance member cell, found {0}")]
    GovernanceCellCount(usize),
    #[error("unsupported governance member cell version {0}")]
    GovernanceVersion(u8),
    #[error("no presented credential matches a governance member")]
    UnauthorizedGovernanceMember,
    #[error("no omni-lock cell found in inputs")]
    OmniLockCellCount,
    #[error("operation not supported")]
    NotSupported,
    #[error("expected exactly one config cell, found {0}")]
    ConfigCellCount(usize),
}

impl ValidationError {
    /// Stable exit code for this rejection. Accept is always 0.
    pub fn code(&self) -> i32 {
        match self {
            ValidationError::ArgumentsLength => -1,
            ValidationError::Encoding(_) => -2,
            ValidationError::Syscall(_) => -3,
            ValidationError::ScriptTooLong { .. } => -21,
            ValidationError::Overflow => -51,
            ValidationError::Amount => -52,
            ValidationError::OwnerModeRequired { .. } => 80,
            ValidationError::TokenIdMismatch => 81,
            ValidationError::TokenIdSize { .. } => 82,
            ValidationError::GovernanceCellCount(_) => 92,
            ValidationError::GovernanceVersion(_) => 93,
            ValidationError::UnauthorizedGovernanceMember => 94,
            ValidationError::OmniLockCellCount => 95,
            ValidationError::NotSupported => 96,
            ValidationError::ConfigCellCount(_) => 97,
        }
    }
}

impl From<VerificationError> for ValidationError {
    fn from(err: VerificationError) -> Self {
        ValidationError::Encoding(err.into())
    }
}

impl From<SysError> for ValidationError {
    fn from(err: SysError) -> Self {
        match err {
            SysError::LengthNotEnough(actual) => ValidationError::ScriptTooLong { actual },
            other => ValidationError::Syscall(other),
        }
    }
}

/// Result of one validation pass as reported to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub accepted: bool,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Verdict {
    pub fn from_result(result: &Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Verdict {
                accepted: true,
                code: 0,
                reason: None,
            },
            Err(err) => Verdict {
                accepted: false,
                code: err.code(),
                reason: Some(err.to_string()),
            },
        }
    }
}
