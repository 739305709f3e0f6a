use molecule::prelude::Reader;
use tracing::{debug, warn};

use crate::codec::{BytesVecReader, CodecError, NUMBER_SIZE};
use crate::scanner::find_cells_by_code_hash;
use crate::tx::{TransactionData, load_cell_data_checked};
use crate::types::{
    Byte32, CONFIG_CELL_CURRENT_VERSION, CellField, ConfigSlot, MAX_CELL_NUM, Source, TMP_SIZE,
    TYPE_ID_SIZE, ValidationError,
};

/// One decoded entry of the config table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub slot: ConfigSlot,
    pub value: Vec<u8>,
}

/// Resolves config slots from the config cell found in a transaction's cell deps.
///
/// Nothing is cached: every lookup scans and decodes the cell again.
pub struct ConfigResolver<'a, T: TransactionData + ?Sized> {
    tx: &'a T,
    config_cell_type_id: Byte32,
}

impl<'a, T: TransactionData + ?Sized> ConfigResolver<'a, T> {
    /// # Arguments
    /// * `tx` - Transaction whose cell deps carry the config cell
    /// * `config_cell_type_id` - Type id identifying the config cell on this network
    pub fn new(tx: &'a T, config_cell_type_id: Byte32) -> Self {
        Self {
            tx,
            config_cell_type_id,
        }
    }

    /// Index of the config cell in the cell deps. Exactly one must exist.
    pub fn locate(&self) -> Result<usize, ValidationError> {
        let mut found = [0usize; MAX_CELL_NUM];
        let count = find_cells_by_code_hash(
            self.tx,
            CellField::Type,
            Source::CellDep,
            &self.config_cell_type_id,
            &mut found,
        )?;
        if count != 1 {
            warn!(count, "config cell count error, expect 1");
            return Err(ValidationError::ConfigCellCount(count));
        }
        Ok(found[0])
    }

    /// Returns the 32-byte type id stored at `slot`.
    ///
    /// The element's header must equal the slot ordinal; a mismatch means the
    /// table is misordered or from another version.
    pub fn type_id(&self, slot: ConfigSlot) -> Result<Byte32, ValidationError> {
        // Step 1: Find the one config cell in the cell deps
        let index = self.locate()?;

        // Step 2: Load its data; a payload larger than the buffer is rejected
        let mut buf = [0u8; TMP_SIZE];
        let len = load_cell_data_checked(self.tx, &mut buf, index, Source::CellDep)?;
        debug!(index, len, "loaded config cell data");
        if len == 0 {
            return Err(CodecError::Header.into());
        }

        // Step 3: Skip the version byte and verify the rest as a BytesVec
        let table = BytesVecReader::from_slice(&buf[1..len])?;

        // Step 4: Select the element of this slot, length prefix included
        let element = table
            .get(slot.index() as usize)
            .ok_or(CodecError::IndexOutOfBound)?
            .as_slice();
        if element.len() < NUMBER_SIZE * 2 + TYPE_ID_SIZE {
            return Err(CodecError::TotalSize.into());
        }

        // Step 5: The element header must name the slot it was read for
        let header = u32::from_le_bytes([element[4], element[5], element[6], element[7]]);
        if header != slot.index() {
            warn!(expected = slot.index(), actual = header, "config header error");
            return Err(CodecError::HeaderMismatch {
                expected: slot.index(),
                actual: header,
            }
            .into());
        }

        // Step 6: Copy out the type id that follows the header
        let mut type_id = [0u8; TYPE_ID_SIZE];
        type_id.copy_from_slice(&element[NUMBER_SIZE * 2..NUMBER_SIZE * 2 + TYPE_ID_SIZE]);
        debug!(?slot, type_id = %hex::encode(type_id), "resolved config slot");
        Ok(type_id)
    }

    /// Decodes the whole config table of the located config cell.
    pub fn entries(&self) -> Result<Vec<ConfigEntry>, ValidationError> {
        let index = self.locate()?;
        let mut buf = [0u8; TMP_SIZE];
        let len = load_cell_data_checked(self.tx, &mut buf, index, Source::CellDep)?;
        parse_config_table(&buf[..len])
    }
}

/// Decodes a full config cell payload into its entries.
///
/// Entries whose header names no known slot are skipped. Only version 0
/// payloads are understood.
pub fn parse_config_table(data: &[u8]) -> Result<Vec<ConfigEntry>, ValidationError> {
    let (&version, body) = data.split_first().ok_or(CodecError::Header)?;
    if version != CONFIG_CELL_CURRENT_VERSION {
        warn!(version, "unsupported config cell version");
        return Err(ValidationError::NotSupported);
    }

    let table = BytesVecReader::from_compatible_slice(body)?;
    let mut entries = Vec::with_capacity(table.len());
    for position in 0..table.len() {
        let raw = table.get_unchecked(position).raw_data();
        if raw.len() < NUMBER_SIZE {
            return Err(CodecError::TotalSize.into());
        }
        let header = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        match ConfigSlot::try_from(header) {
            Ok(slot) => entries.push(ConfigEntry {
                slot,
                value: raw[NUMBER_SIZE..].to_vec(),
            }),
            Err(unknown) => {
                warn!(position, header = unknown, "config key is removed or not defined, skipping");
            }
        }
    }
    Ok(entries)
}
