use tracing::debug;

use crate::codec::{CodecError, SCRIPT_CODE_HASH_OFFSET, SCRIPT_HASH_TYPE_OFFSET};
use crate::tx::{TransactionData, load_cell_field_checked};
use crate::types::{
    Byte32, CellField, MAX_CELL_NUM, ScriptHashType, Source, SysError, TMP_SIZE, ValidationError,
};

/// Scans `source` for cells whose `field` script carries `expected_hash` as
/// its code hash, writing matching indices into `found` in ascending order.
///
/// At most `found.len()` indices are collected and at most [`MAX_CELL_NUM`]
/// cells are inspected. Returns how many indices were written.
///
/// # Scan rules
/// - index out of bound ends the scan
/// - a missing field (no type script) skips the cell
/// - a matching code hash whose hash type is not `type` ends the scan
/// - any other load failure aborts with an error
pub fn find_cells_by_code_hash<T: TransactionData + ?Sized>(
    tx: &T,
    field: CellField,
    source: Source,
    expected_hash: &Byte32,
    found: &mut [usize],
) -> Result<usize, ValidationError> {
    debug!(
        code_hash = %hex::encode(expected_hash),
        ?source,
        ?field,
        "scanning cells by code hash"
    );

    let cap = found.len();
    let mut count = 0;
    if cap == 0 {
        return Ok(0);
    }

    let mut buf = [0u8; TMP_SIZE];
    for index in 0..MAX_CELL_NUM {
        let len = match load_cell_field_checked(tx, &mut buf, index, source, field) {
            Ok(len) => len,
            Err(SysError::IndexOutOfBound) => break,
            Err(SysError::ItemMissing) => continue,
            Err(err) => return Err(err.into()),
        };
        if len <= SCRIPT_HASH_TYPE_OFFSET {
            return Err(CodecError::Header.into());
        }

        if buf[SCRIPT_CODE_HASH_OFFSET..SCRIPT_HASH_TYPE_OFFSET] != expected_hash[..] {
            continue;
        }
        debug!(index, "cell found");
        if buf[SCRIPT_HASH_TYPE_OFFSET] != ScriptHashType::Type.as_byte() {
            break;
        }

        found[count] = index;
        count += 1;
        if count == cap {
            break;
        }
    }

    Ok(count)
}
