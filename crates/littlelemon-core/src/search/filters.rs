use std::collections::HashSet;

use crate::models::{Filter, MenuItem};

/// The category toggles shown above the menu list, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// One inactive filter per distinct category, in the order the
    /// categories first appear in `menu`.
    pub fn derive(menu: &[MenuItem]) -> Self {
        let mut seen = HashSet::new();
        let filters = menu
            .iter()
            .filter(|item| seen.insert(item.category.as_str()))
            .map(|item| Filter::new(item.category.clone()))
            .collect();
        Self { filters }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Filter> {
        self.filters.get(index)
    }

    /// Flip the filter named `name`. Returns its new value, or None when no
    /// such filter exists.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        let filter = self.filters.iter_mut().find(|f| f.name == name)?;
        filter.value = !filter.value;
        Some(filter.value)
    }

    pub fn active_categories(&self) -> HashSet<String> {
        self.filters
            .iter()
            .filter(|f| f.value)
            .map(|f| f.name.clone())
            .collect()
    }
}
