use std::future::Future;

use tracing::{debug, error, info, warn};

use crate::models::MenuItem;
use crate::store::MenuTable;
use crate::Result;

/// Where the remote menu comes from.
pub trait MenuSource: Send + Sync {
    fn fetch_menu(&self) -> impl Future<Output = Result<Vec<MenuItem>>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOrigin {
    /// Rows were already in the local table.
    Table,
    /// The table was empty and the remote document was fetched.
    Remote,
}

#[derive(Debug, Clone)]
pub struct MenuLoad {
    pub items: Vec<MenuItem>,
    pub origin: MenuOrigin,
}

#[derive(Clone)]
pub struct MenuCacheLoader<S> {
    table: MenuTable,
    source: S,
}

impl<S: MenuSource> MenuCacheLoader<S> {
    pub fn new(table: MenuTable, source: S) -> Self {
        Self { table, source }
    }

    /// Load the menu, propagating read and fetch failures.
    ///
    /// A failure while persisting fetched items is logged and does not fail
    /// the load; the fetched items are returned either way.
    pub async fn try_load(&self) -> Result<MenuLoad> {
        let cached = self.table.all_items().await?;
        if !cached.is_empty() {
            debug!(count = cached.len(), "Menu served from local table");
            return Ok(MenuLoad {
                items: cached,
                origin: MenuOrigin::Table,
            });
        }

        info!("Local menu table empty, fetching remote menu");
        let fetched = self.source.fetch_menu().await?;

        if let Err(e) = self.table.store_items(&fetched).await {
            warn!(error = %e, "Failed to persist fetched menu");
        }

        Ok(MenuLoad {
            items: fetched,
            origin: MenuOrigin::Remote,
        })
    }

    /// Load the menu. Any failure is logged and yields an empty menu.
    pub async fn load(&self) -> Vec<MenuItem> {
        match self.try_load().await {
            Ok(load) => load.items,
            Err(e) => {
                error!(error = %e, "Error fetching menu data");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuResponse;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed JSON document and counts fetches.
    struct StubSource {
        body: String,
        fetches: AtomicUsize,
    }

    impl StubSource {
        fn new(body: &str) -> Self {
            Self {
                body: body.to_string(),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl MenuSource for StubSource {
        async fn fetch_menu(&self) -> Result<Vec<MenuItem>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let parsed: MenuResponse = serde_json::from_str(&self.body)?;
            Ok(parsed.into_items())
        }
    }

    const GREEK_ONLY: &str = r#"{"menu":[{"name":"Greek Salad","price":12.99,
        "description":"The famous greek salad","category":"Mains","image":"salad.jpg"}]}"#;

    #[tokio::test]
    async fn test_empty_table_fetches_and_persists() {
        let table = MenuTable::open_in_memory().await.unwrap();
        let loader = MenuCacheLoader::new(table.clone(), StubSource::new(GREEK_ONLY));

        let load = loader.try_load().await.unwrap();
        assert_eq!(load.origin, MenuOrigin::Remote);
        assert_eq!(load.items.len(), 1);
        assert_eq!(load.items[0].display_price(), "$12.99");

        let rows = table.all_items().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Greek Salad");
    }

    #[tokio::test]
    async fn test_populated_table_skips_fetch() {
        let table = MenuTable::open_in_memory().await.unwrap();
        let loader = MenuCacheLoader::new(table, StubSource::new(GREEK_ONLY));

        loader.load().await;
        let second = loader.try_load().await.unwrap();

        assert_eq!(second.origin, MenuOrigin::Table);
        assert_eq!(second.items.len(), 1);
        assert_eq!(loader.source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_parse_failure_yields_empty_menu() {
        let table = MenuTable::open_in_memory().await.unwrap();
        let loader = MenuCacheLoader::new(table.clone(), StubSource::new("{\"items\": []}"));

        assert!(matches!(loader.try_load().await, Err(Error::Parse(_))));
        assert!(loader.load().await.is_empty());
        assert!(table.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_persist_failure_still_returns_fetched_menu() {
        let duplicated = r#"{"menu":[
            {"name":"Pasta","price":18.99,"description":"d","category":"mains","image":"pasta.jpg"},
            {"name":"Pasta","price":18.99,"description":"d","category":"mains","image":"pasta.jpg"}]}"#;
        let table = MenuTable::open_in_memory().await.unwrap();
        let loader = MenuCacheLoader::new(table.clone(), StubSource::new(duplicated));

        let items = loader.load().await;
        assert_eq!(items.len(), 2);
        assert_eq!(table.all_items().await.unwrap().len(), 1);
    }
}
