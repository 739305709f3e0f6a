use tracing::debug;

use crate::scanner::resolve_length;
use crate::tx::TransactionData;
use crate::types::{Action, Source, TMP_SIZE_SHORT};

/// Classifies the transaction by the witness at index `inputs.len()`.
pub fn classify<T: TransactionData + ?Sized>(tx: &T) -> Action {
    let witness_index = resolve_length(tx, Source::Input);
    debug!(witness_index, "action witness index");

    let mut buf = [0u8; TMP_SIZE_SHORT];
    let len = match tx.load_witness(&mut buf, witness_index, Source::Input) {
        Ok(len) => len,
        Err(err) => {
            debug!(%err, "no action witness, treating as transfer");
            return Action::Others;
        }
    };
    if len == 0 || len > TMP_SIZE_SHORT {
        return Action::Others;
    }
    parse_action_witness(&buf[..len])
}

/// Matches `[version][name]` against the action catalog. The version byte is
/// skipped, not checked.
pub fn parse_action_witness(witness: &[u8]) -> Action {
    let Some((_version, name)) = witness.split_first() else {
        return Action::Others;
    };
    let action = Action::from_name(name).unwrap_or_default();
    debug!(name = %String::from_utf8_lossy(name), %action, "action witness");
    action
}
