//! Transaction Access Module
//!
//! The validators never own transaction data. Every field they reason about is
//! loaded on demand through [`TransactionData`], into buffers the caller owns.
//!
//! Loads follow partial-load semantics: at most `buf.len()` bytes are copied and
//! the item's full length is returned. The `*_checked` helpers for cell fields and cell data turn a length
//! larger than the buffer into [`SysError::LengthNotEnough`].

mod mock;

#[cfg(test)]
pub(crate) mod fixtures;

pub use mock::{MockCell, MockInput, MockScript, MockTransaction};

use crate::types::{CellField, Source, SysError};

/// Data-access capability provided by the host.
pub trait TransactionData {
    /// Loads one projection of the cell at `index` in `source`.
    fn load_cell_field(
        &self,
        buf: &mut [u8],
        index: usize,
        source: Source,
        field: CellField,
    ) -> Result<usize, SysError>;

    /// Loads the data payload of the cell at `index` in `source`.
    fn load_cell_data(&self, buf: &mut [u8], index: usize, source: Source) -> Result<usize, SysError>;

    /// Loads the witness at `index`. `Source::Input` addresses the raw witness list.
    fn load_witness(&self, buf: &mut [u8], index: usize, source: Source) -> Result<usize, SysError>;

    /// Loads the `since` field of the input at `index`; used as an existence probe.
    fn load_input_since(&self, index: usize, source: Source) -> Result<u64, SysError>;
}

fn checked(len: usize, buf: &[u8]) -> Result<usize, SysError> {
    if len > buf.len() {
        return Err(SysError::LengthNotEnough(len));
    }
    Ok(len)
}

pub fn load_cell_field_checked<T: TransactionData + ?Sized>(
    tx: &T,
    buf: &mut [u8],
    index: usize,
    source: Source,
    field: CellField,
) -> Result<usize, SysError> {
    let len = tx.load_cell_field(buf, index, source, field)?;
    checked(len, buf)
}

pub fn load_cell_data_checked<T: TransactionData + ?Sized>(
    tx: &T,
    buf: &mut [u8],
    index: usize,
    source: Source,
) -> Result<usize, SysError> {
    let len = tx.load_cell_data(buf, index, source)?;
    checked(len, buf)
}

/// Copies `item` into `buf` as far as it fits and reports the full length.
pub(crate) fn partial_copy(buf: &mut [u8], item: &[u8]) -> usize {
    let copied = buf.len().min(item.len());
    buf[..copied].copy_from_slice(&item[..copied]);
    item.len()
}
