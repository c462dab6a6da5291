//! Data models for Little Lemon.
//!
//! - `MenuItem`, `MenuResponse`: dishes as served by the remote menu and
//!   stored in the local table
//! - `Filter`: a toggleable category filter
//! - `Profile`, `ProfileField`: the user's identity and notification
//!   preferences, plus the per-field key and default table

pub mod menu;
pub mod profile;

pub use menu::{Filter, MenuItem, MenuResponse};
pub use profile::{FieldValue, Profile, ProfileField};
