//! Fetch-once-then-persist menu loading.
//!
//! On startup the menu comes from the local table. Only when the table is
//! empty is the remote document fetched, and its items are then written to
//! the table so later runs work offline.

pub mod loader;

pub use loader::{MenuCacheLoader, MenuLoad, MenuOrigin, MenuSource};
