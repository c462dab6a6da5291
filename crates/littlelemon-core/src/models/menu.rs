use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::utils::format::{format_price, truncate_description};

/// Descriptions longer than this are cut off in the menu list.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 64;

/// A single orderable dish. `name` is the primary key of the local table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image: String,
}

impl MenuItem {
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }

    pub fn description_preview(&self) -> String {
        truncate_description(&self.description, DESCRIPTION_PREVIEW_CHARS)
    }
}

/// Payload of the remote menu document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub menu: Vec<MenuItem>,
}

impl MenuResponse {
    /// The served items, minus any whose price is negative or not a number.
    pub fn into_items(self) -> Vec<MenuItem> {
        self.menu
            .into_iter()
            .filter(|item| {
                let valid = item.price.is_finite() && item.price >= 0.0;
                if !valid {
                    warn!(name = %item.name, price = item.price, "Skipping menu item with invalid price");
                }
                valid
            })
            .collect()
    }
}

/// A category toggle on the home screen. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub value: bool,
}

impl Filter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: false,
        }
    }
}
