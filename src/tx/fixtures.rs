//! Shared transaction fixtures for the validator tests.
//!
//! A deployment is one config cell and one governance member cell in the cell
//! deps, with the token's type script as the running script group.

use molecule::prelude::Entity;

use super::{MockCell, MockScript, MockTransaction};
use crate::codec::{build_config_cell_data, build_governance_members};
use crate::types::{Byte32, ConfigSlot, ScriptHashType};

pub const CONFIG_CELL_TYPE_ID: Byte32 = [0x11; 32];
pub const GOVERNANCE_TYPE_ID: Byte32 = [0x22; 32];
pub const OMNI_LOCK_TYPE_ID: Byte32 = [0x33; 32];
pub const TOKEN_CODE_HASH: Byte32 = [0x44; 32];
pub const GOVERNANCE_LOCK_ARGS: [u8; 22] = [
    0x06, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x5a,
    0x5a, 0x5a, 0x5a, 0x5a, 0x5a, 0x00,
];

pub fn plain_lock() -> MockScript {
    MockScript::new([0x01; 32], ScriptHashType::Data1, vec![0xee; 20])
}

/// Value stored for `slot` in the fixture config table.
pub fn slot_value(slot: ConfigSlot) -> Byte32 {
    match slot {
        ConfigSlot::GovernanceMemberCellTypeId => GOVERNANCE_TYPE_ID,
        ConfigSlot::OmniLockTypeId => OMNI_LOCK_TYPE_ID,
        other => [0x80 | other.index() as u8; 32],
    }
}

pub fn config_data() -> Vec<u8> {
    let values: Vec<(u32, Byte32)> = ConfigSlot::ALL
        .iter()
        .map(|slot| (slot.index(), slot_value(*slot)))
        .collect();
    let entries: Vec<(u32, &[u8])> = values
        .iter()
        .map(|(header, value)| (*header, value.as_slice()))
        .collect();
    build_config_cell_data(0, &entries)
}

pub fn config_cell() -> MockCell {
    MockCell::new(plain_lock())
        .with_type(MockScript::new(CONFIG_CELL_TYPE_ID, ScriptHashType::Type, vec![]))
        .with_data(config_data())
}

pub fn governance_data(version: u8, lock_args: &[u8]) -> Vec<u8> {
    let mut data = vec![version];
    let record = build_governance_members(&[0x01; 32], &[&[0x5a_u8; 20][..]], &[0, 1, 1], lock_args);
    data.extend_from_slice(record.as_slice());
    data
}

pub fn governance_cell(lock_args: &[u8]) -> MockCell {
    MockCell::new(plain_lock())
        .with_type(MockScript::new(GOVERNANCE_TYPE_ID, ScriptHashType::Type, vec![0x00]))
        .with_data(governance_data(0, lock_args))
}

/// Input cell locked by the omni lock with the given args.
pub fn omni_lock_cell(args: &[u8]) -> MockCell {
    MockCell::new(MockScript::new(OMNI_LOCK_TYPE_ID, ScriptHashType::Type, args.to_vec()))
}

pub fn token_script() -> MockScript {
    MockScript::new(TOKEN_CODE_HASH, ScriptHashType::Type, vec![0x77; 32])
}

pub fn token_cell(amount: u128) -> MockCell {
    MockCell::new(plain_lock())
        .with_type(token_script())
        .with_data(amount.to_le_bytes().to_vec())
}

/// Config and governance cells in the deps, token script as the group.
pub fn deployment() -> MockTransaction {
    MockTransaction::new()
        .with_script_group(token_script())
        .cell_dep(config_cell())
        .cell_dep(governance_cell(&GOVERNANCE_LOCK_ARGS))
}

pub fn action_witness(name: &str) -> Vec<u8> {
    let mut witness = vec![0u8];
    witness.extend_from_slice(name.as_bytes());
    witness
}
