//! Profile persistence and validation.
//!
//! Profile fields are stored one key per field in a `KeyValueStore`, as
//! strings. Saving is gated on `validation::can_save`.

pub mod store;
pub mod validation;

pub use store::{ProfileStore, SAVE_CONFIRMATION_BODY, SAVE_CONFIRMATION_TITLE};
pub use validation::{can_save, validate_email, validate_name, validate_number};
