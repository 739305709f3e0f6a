//! Transaction Validation Module
//!
//! Entry points run by the invoking context. Each returns `Ok(())` on accept
//! or the first rejection reason; [`exit_code`] turns that into the exit code.
//!
//! - `validate_extension`: token extension check (conservation, owner mode, token id)
//! - `validate_owner`: owner authorization through the governance member cell
//! - `classify_action`: declared action of the transaction, never an error

mod validator;


pub use validator::{ExtensionContext, Validator, exit_code};
