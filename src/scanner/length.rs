use tracing::debug;

use crate::tx::TransactionData;
use crate::types::Source;

/// Largest length the probe will ever report.
pub const LENGTH_SENTINEL: usize = i32::MAX as usize;

/// Counts the elements of `source` by probing each input's `since` field.
pub fn resolve_length<T: TransactionData + ?Sized>(tx: &T, source: Source) -> usize {
    let len = resolve_length_with(|index| tx.load_input_since(index, source).is_ok());
    debug!(?source, len, "resolved source length");
    len
}

/// Finds the first index for which `exists` is false, assuming every lower
/// index exists.
///
/// Doubles an upper bound from 4 until a probe fails, then binary-searches
/// the boundary, so the oracle is called O(log n) times.
pub fn resolve_length_with<F>(exists: F) -> usize
where
    F: Fn(usize) -> bool,
{
    if !exists(0) {
        return 0;
    }

    // Invariant from here on: `lo` exists, `hi` does not.
    let mut lo = 0;
    let mut hi = 4;
    while exists(hi) {
        if hi == LENGTH_SENTINEL {
            return LENGTH_SENTINEL;
        }
        lo = hi;
        hi = if hi > LENGTH_SENTINEL / 2 {
            LENGTH_SENTINEL
        } else {
            hi * 2
        };
    }

    while lo + 1 != hi {
        let mid = lo + (hi - lo) / 2;
        if exists(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}
