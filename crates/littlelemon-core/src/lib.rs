//! Core library for Little Lemon.
//!
//! Everything the screens need lives here:
//!
//! - `api`: remote menu client
//! - `store`: key-value store and the local SQLite menu table
//! - `cache`: fetch-once-then-persist menu loading
//! - `search`: category filters, name search and query debouncing
//! - `profile`: profile persistence and field validation
//! - `auth`: onboarding and the navigation gate
//! - `state`: home screen state owned by the front end

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod profile;
pub mod search;
pub mod state;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
