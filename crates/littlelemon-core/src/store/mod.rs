//! Persistence for Little Lemon.
//!
//! - `KeyValueStore`: string-keyed async storage for the profile, with a
//!   JSON-file implementation and an in-memory one
//! - `MenuTable`: the SQLite `menuitems` relation, accessed through
//!   tokio-rusqlite so queries run off the async runtime

pub mod kv;
pub mod menu_table;

pub use kv::{FileKvStore, KeyValueStore, MemoryKvStore};
pub use menu_table::MenuTable;
