//! Client-side menu search.
//!
//! - `filter`: the `apply` rule set (category AND case-insensitive name)
//! - `filters`: the category toggles derived from a loaded menu
//! - `debounce`: collapses bursts of query edits into one update

pub mod debounce;
pub mod filter;
pub mod filters;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use filter::apply;
pub use filters::FilterSet;
