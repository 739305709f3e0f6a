use tracing::{debug, warn};

use crate::codec::CodecError;
use crate::tx::TransactionData;
use crate::types::{Source, SysError, U128_BYTES, ValidationError};

/// Token totals of the group inputs and group outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSums {
    pub input: u128,
    pub output: u128,
}

impl GroupSums {
    /// True for a plain transfer, false for a mint or a burn.
    pub fn is_conserved(&self) -> bool {
        self.input == self.output
    }
}

/// Sums the amounts of all group input cells and all group output cells.
///
/// # Returns
/// * `Ok(GroupSums)` with both totals; comparing them is the caller's job
/// * `Err(Overflow)` if either total exceeds `u128::MAX`
/// * `Err(Encoding)` if a cell's data is shorter than 16 bytes
pub fn compute_group_sums<T: TransactionData + ?Sized>(tx: &T) -> Result<GroupSums, ValidationError> {
    let sums = GroupSums {
        input: sum_source(tx, Source::GroupInput)?,
        output: sum_source(tx, Source::GroupOutput)?,
    };
    debug!(input = sums.input, output = sums.output, "group amounts");
    Ok(sums)
}

/// Walks `source` from index 0 until the host reports the end of the list.
fn sum_source<T: TransactionData + ?Sized>(tx: &T, source: Source) -> Result<u128, ValidationError> {
    let mut total: u128 = 0;
    let mut index = 0;
    loop {
        let mut buf = [0u8; U128_BYTES];
        let len = match tx.load_cell_data(&mut buf, index, source) {
            Ok(len) => len,
            Err(SysError::IndexOutOfBound) => break,
            Err(err) => return Err(err.into()),
        };
        if len < U128_BYTES {
            warn!(?source, index, len, "amount data too short");
            return Err(CodecError::TotalSize.into());
        }

        let amount = u128::from_le_bytes(buf);
        total = total.checked_add(amount).ok_or_else(|| {
            warn!(?source, index, "amount overflow");
            ValidationError::Overflow
        })?;
        index += 1;
    }
    Ok(total)
}
