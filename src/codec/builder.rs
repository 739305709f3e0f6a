//! Builders for the entities the validators read: scripts, the governance
//! membership record and the config cell payload.

use ckb_gen_types::packed::{Byte32 as PackedByte32, Bytes, BytesVec, Script};
use molecule::prelude::{Builder, Byte, Entity};

use super::governance_members::GovernanceMembers;
use crate::types::Byte32;

pub fn pack_bytes(raw: &[u8]) -> Bytes {
    Bytes::new_builder()
        .extend(raw.iter().copied().map(Byte::new))
        .build()
}

pub fn pack_byte32(hash: &Byte32) -> PackedByte32 {
    PackedByte32::new_builder().set(hash.map(Byte::new)).build()
}

pub fn build_script(code_hash: &Byte32, hash_type: u8, args: &[u8]) -> Script {
    Script::new_builder()
        .code_hash(pack_byte32(code_hash))
        .hash_type(Byte::new(hash_type))
        .args(pack_bytes(args))
        .build()
}

pub fn build_governance_members(
    parent_id: &[u8],
    members: &[&[u8]],
    multisig_args: &[u8],
    lock_args: &[u8],
) -> GovernanceMembers {
    let members = BytesVec::new_builder()
        .extend(members.iter().map(|member| pack_bytes(member)))
        .build();
    GovernanceMembers::new_builder()
        .parent_id(pack_bytes(parent_id))
        .members(members)
        .multisig_args(pack_bytes(multisig_args))
        .lock_args(pack_bytes(lock_args))
        .build()
}

/// Builds a config cell payload: version byte, then a `BytesVec` whose
/// elements are `[4-byte header][value]`.
pub fn build_config_cell_data(version: u8, entries: &[(u32, &[u8])]) -> Vec<u8> {
    let elements = entries.iter().map(|(header, value)| {
        let mut raw = header.to_le_bytes().to_vec();
        raw.extend_from_slice(value);
        pack_bytes(&raw)
    });
    let table = BytesVec::new_builder().extend(elements).build();

    let mut out = Vec::with_capacity(1 + table.as_slice().len());
    out.push(version);
    out.extend_from_slice(table.as_slice());
    out
}
