use tracing::{debug, warn};

use crate::action::classify;
use crate::amount::compute_group_sums;
use crate::governance::authorize_owner;
use crate::tx::TransactionData;
use crate::types::{Action, Byte32, TOKEN_ID_LEN, ValidationError};

/// Invocation context of the token extension.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionContext<'a> {
    /// Asserted by the invoking token script, not derived here.
    pub is_owner_mode: bool,
    /// Position of this extension in the token's extension list.
    pub extension_index: usize,
    /// Extension args; must be the 20-byte token id.
    pub args: &'a [u8],
}

/// Runs the validation entry points against one deployment.
pub struct Validator {
    config_cell_type_id: Byte32,
}

impl Validator {
    /// # Arguments
    /// * `config_cell_type_id` - Type id of the config cell for the target network
    pub fn new(config_cell_type_id: Byte32) -> Self {
        Self { config_cell_type_id }
    }

    pub fn config_cell_type_id(&self) -> &Byte32 {
        &self.config_cell_type_id
    }

    /// Validate the token extension for one transaction
    ///
    /// Transfers are accepted as long as amounts are conserved. A mint or a burn
    /// additionally requires owner mode.
    ///
    /// # Returns
    /// * `Ok(())` if the transaction is accepted
    /// * `Err(OwnerModeRequired)` for a non-conserving transaction outside owner mode
    /// * `Err(TokenIdSize)` if the args are not a 20-byte token id
    /// * any error raised while summing group amounts
    pub fn validate_extension<T: TransactionData + ?Sized>(
        &self,
        tx: &T,
        context: &ExtensionContext<'_>,
    ) -> Result<(), ValidationError> {
        debug!(
            extension_index = context.extension_index,
            is_owner_mode = context.is_owner_mode,
            "validating token extension"
        );

        let sums = compute_group_sums(tx)?;
        if !sums.is_conserved() && !context.is_owner_mode {
            warn!(
                input = sums.input,
                output = sums.output,
                "amount changed without owner mode"
            );
            return Err(ValidationError::OwnerModeRequired {
                input: sums.input,
                output: sums.output,
            });
        }

        if context.args.len() != TOKEN_ID_LEN {
            warn!(len = context.args.len(), "token id size error");
            return Err(ValidationError::TokenIdSize {
                expected: TOKEN_ID_LEN,
                got: context.args.len(),
            });
        }

        debug!("token extension validation successful");
        Ok(())
    }

    /// Validate that the transaction may act as the token owner.
    pub fn validate_owner<T: TransactionData + ?Sized>(&self, tx: &T) -> Result<(), ValidationError> {
        authorize_owner(tx, self.config_cell_type_id)
    }

    /// Declared action of the transaction; falls back to `Action::Others`.
    pub fn classify_action<T: TransactionData + ?Sized>(&self, tx: &T) -> Action {
        classify(tx)
    }
}

/// Exit code of a validation pass: 0 on accept, the error's code otherwise.
pub fn exit_code(result: &Result<(), ValidationError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.code(),
    }
}
