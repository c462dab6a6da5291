//! Remote menu client.
//!
//! The menu is a static JSON document (`{ "menu": [...] }`) served over
//! plain HTTPS. Images are relative filenames resolved against a fixed
//! base URL.

pub mod client;
pub mod error;

pub use client::MenuClient;
pub use error::ApiError;
