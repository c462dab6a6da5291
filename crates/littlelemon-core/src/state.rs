//! Home screen state.
//!
//! Owned by whichever front end drives the home screen; nothing here is
//! global. The visible list is derived on demand from the menu, the
//! filters and the settled query.

use crate::models::MenuItem;
use crate::search::{apply, FilterSet};

#[derive(Debug, Clone, Default)]
pub struct MenuState {
    menu: Vec<MenuItem>,
    filters: FilterSet,
    query: String,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the menu.
    ///
    /// Filters are derived from the first non-empty menu only. A later menu
    /// with different categories keeps the original filters.
    pub fn set_menu(&mut self, items: Vec<MenuItem>) {
        if self.filters.is_empty() && !items.is_empty() {
            self.filters = FilterSet::derive(&items);
        }
        self.menu = items;
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Toggle a category filter by name.
    pub fn toggle_filter(&mut self, name: &str) -> Option<bool> {
        self.filters.toggle(name)
    }

    /// Toggle the filter at `index` in display order.
    pub fn toggle_filter_at(&mut self, index: usize) -> Option<bool> {
        let name = self.filters.get(index)?.name.clone();
        self.filters.toggle(&name)
    }

    /// The query the visible list is computed from. Set this from the
    /// debouncer, not from every keystroke.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> Vec<&MenuItem> {
        apply(&self.menu, &self.filters.active_categories(), &self.query)
    }
}
