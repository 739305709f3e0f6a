use molecule::prelude::Reader;
use tracing::{debug, warn};

use super::members::parse_governance_data;
use crate::codec::ScriptReader;
use crate::config_cell::ConfigResolver;
use crate::scanner::find_cells_by_code_hash;
use crate::tx::{TransactionData, load_cell_data_checked, load_cell_field_checked};
use crate::types::{Byte32, CellField, ConfigSlot, MAX_CELL_NUM, Source, TMP_SIZE, ValidationError};

/// Accepts only if an omni-lock input presents the governance lock args.
///
/// A single matching credential suffices; no threshold is applied on top of it.
///
/// # Arguments
/// * `tx` - Transaction under validation
/// * `config_cell_type_id` - Type id of the config cell for this network
///
/// # Returns
/// * `Ok(())` on the first exact args match
/// * `Err(GovernanceCellCount)` unless exactly one governance member cell is a cell dep
/// * `Err(OmniLockCellCount)` if no input is omni-locked
/// * `Err(GovernanceVersion)` for an unsupported record version
/// * `Err(UnauthorizedGovernanceMember)` if no candidate matches
pub fn authorize_owner<T: TransactionData + ?Sized>(
    tx: &T,
    config_cell_type_id: Byte32,
) -> Result<(), ValidationError> {
    let config = ConfigResolver::new(tx, config_cell_type_id);

    // Step 1: Exactly one governance member cell must be a cell dep
    let governance_type_id = config.type_id(ConfigSlot::GovernanceMemberCellTypeId)?;
    let mut governance_cells = [0usize; MAX_CELL_NUM];
    let governance_count = find_cells_by_code_hash(
        tx,
        CellField::Type,
        Source::CellDep,
        &governance_type_id,
        &mut governance_cells,
    )?;
    debug!(governance_count, "governance cells found");
    if governance_count != 1 {
        warn!(governance_count, "expected exactly one governance cell");
        return Err(ValidationError::GovernanceCellCount(governance_count));
    }

    // Step 2: At least one input must be locked by the omni lock
    let omni_lock_type_id = config.type_id(ConfigSlot::OmniLockTypeId)?;
    let mut omni_lock_cells = [0usize; MAX_CELL_NUM];
    let omni_lock_count = find_cells_by_code_hash(
        tx,
        CellField::Lock,
        Source::Input,
        &omni_lock_type_id,
        &mut omni_lock_cells,
    )?;
    debug!(omni_lock_count, "omni lock cells found");
    if omni_lock_count == 0 {
        warn!("no omni lock cell in inputs");
        return Err(ValidationError::OmniLockCellCount);
    }

    // Step 3: Decode the membership record and take its lock args
    let mut governance_data = [0u8; TMP_SIZE];
    let len = load_cell_data_checked(tx, &mut governance_data, governance_cells[0], Source::CellDep)?;
    let members = parse_governance_data(&governance_data[..len])?;
    let governance_args = members.lock_args().raw_data();
    debug!(lock_args = %hex::encode(governance_args), "governance lock args");

    // Step 4: The first omni-lock input presenting those exact args authorizes
    let mut lock = [0u8; TMP_SIZE];
    for &index in &omni_lock_cells[..omni_lock_count] {
        let len = load_cell_field_checked(tx, &mut lock, index, Source::Input, CellField::Lock)?;
        let script = ScriptReader::from_slice(&lock[..len])?;
        let args = script.args().raw_data();
        debug!(index, args = %hex::encode(args), "omni lock candidate");

        if args == governance_args {
            debug!(index, "omni lock args match governance lock args");
            return Ok(());
        }
    }

    warn!("no omni lock args equal the governance lock args");
    Err(ValidationError::UnauthorizedGovernanceMember)
}
