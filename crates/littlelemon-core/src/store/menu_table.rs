//! The `menuitems` table.
//!
//! Rows are inserted once, after the first successful remote fetch, and
//! never updated or deleted by the application.

use std::path::Path;

use tokio_rusqlite::rusqlite::{self, params, params_from_iter};
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::models::MenuItem;
use crate::Result;

/// `price` keeps the INT affinity of the shipped schema. SQLite stores
/// non-integral prices as REAL regardless, so 12.99 reads back as 12.99.
const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS menuitems (
    name TEXT PRIMARY KEY NOT NULL,
    description TEXT NOT NULL,
    price INT NOT NULL,
    image TEXT,
    category TEXT NOT NULL
)";

const SELECT_COLUMNS: &str = "SELECT name, description, price, image, category FROM menuitems";

/// Handle to the local menu table.
///
/// Wraps a tokio-rusqlite Connection that runs statements on a background
/// thread. Clone is cheap and shares the connection.
#[derive(Clone, Debug)]
pub struct MenuTable {
    conn: Connection,
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<MenuItem> {
    Ok(MenuItem {
        name: row.get("name")?,
        description: row.get("description")?,
        price: row.get("price")?,
        image: row.get::<_, Option<String>>("image")?.unwrap_or_default(),
        category: row.get("category")?,
    })
}

impl MenuTable {
    /// Open the database file, creating it and the table if absent.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).await?;
        let table = Self { conn };
        table.initialize().await?;
        Ok(table)
    }

    /// Open an in-memory table for testing.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        let table = Self { conn };
        table.initialize().await?;
        Ok(table)
    }

    /// Create the table if it does not exist yet.
    pub async fn initialize(&self) -> Result<()> {
        self.conn
            .call(|conn| conn.execute_batch(CREATE_TABLE))
            .await?;
        Ok(())
    }

    /// Every row, in insertion order.
    pub async fn all_items(&self) -> Result<Vec<MenuItem>> {
        let items = self
            .conn
            .call(|conn| -> rusqlite::Result<Vec<MenuItem>> {
                let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_COLUMNS))?;
                let items = stmt
                    .query_map([], row_to_item)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(items)
            })
            .await?;
        debug!(count = items.len(), "Menu table read");
        Ok(items)
    }

    /// Insert a single row. Fails if an item with the same name exists.
    pub async fn insert_item(&self, item: &MenuItem) -> Result<()> {
        let item = item.clone();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO menuitems (name, description, price, image, category)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![item.name, item.description, item.price, item.image, item.category],
                )
            })
            .await?;
        Ok(())
    }

    /// Insert each item in turn, stopping at the first failure. Rows written
    /// before the failure stay in the table.
    pub async fn store_items(&self, items: &[MenuItem]) -> Result<usize> {
        for item in items {
            self.insert_item(item).await?;
        }
        debug!(count = items.len(), "Menu items stored");
        Ok(items.len())
    }

    /// Rows whose name contains `query` (SQLite `LIKE`, case-insensitive for
    /// ASCII) and, when `categories` is non-empty, whose category is one of
    /// them. With an empty query and no categories this is `all_items`.
    pub async fn filter_items(&self, query: &str, categories: &[String]) -> Result<Vec<MenuItem>> {
        if query.is_empty() && categories.is_empty() {
            return self.all_items().await;
        }

        let mut sql = format!("{} WHERE name LIKE ?", SELECT_COLUMNS);
        let mut args = vec![format!("%{}%", query)];
        if !categories.is_empty() {
            let marks = vec!["?"; categories.len()].join(",");
            sql.push_str(&format!(" AND category IN ({})", marks));
            args.extend(categories.iter().cloned());
        }
        sql.push_str(" ORDER BY rowid");

        let items = self
            .conn
            .call(move |conn| -> rusqlite::Result<Vec<MenuItem>> {
                let mut stmt = conn.prepare(&sql)?;
                let items = stmt
                    .query_map(params_from_iter(args.iter()), row_to_item)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(items)
            })
            .await?;
        Ok(items)
    }

    pub async fn is_empty(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM menuitems", [], |row| row.get(0)))
            .await?;
        Ok(count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn item(name: &str, price: f64, category: &str) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            category: category.to_string(),
            image: format!("{}.jpg", name.to_lowercase().replace(' ', "")),
        }
    }

    fn sample() -> Vec<MenuItem> {
        vec![
            item("Greek Salad", 12.99, "starters"),
            item("Bruschetta", 7.99, "starters"),
            item("Grilled Fish", 20.0, "mains"),
            item("Lemon Dessert", 4.99, "desserts"),
        ]
    }

    #[tokio::test]
    async fn test_new_table_is_empty() {
        let table = MenuTable::open_in_memory().await.unwrap();
        assert!(table.is_empty().await.unwrap());
        assert!(table.all_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_idempotent() {
        let table = MenuTable::open_in_memory().await.unwrap();
        table.store_items(&sample()).await.unwrap();
        table.initialize().await.unwrap();
        assert_eq!(table.all_items().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_round_trip_same_items() {
        let table = MenuTable::open_in_memory().await.unwrap();
        let items = sample();
        assert_eq!(table.store_items(&items).await.unwrap(), 4);

        let mut read = table.all_items().await.unwrap();
        let mut expected = items.clone();
        read.sort_by(|a, b| a.name.cmp(&b.name));
        expected.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(read, expected);
    }

    #[tokio::test]
    async fn test_fractional_price_survives_int_column() {
        let table = MenuTable::open_in_memory().await.unwrap();
        table.insert_item(&item("Greek Salad", 12.99, "mains")).await.unwrap();
        let read = table.all_items().await.unwrap();
        assert_eq!(read[0].price, 12.99);
        assert_eq!(read[0].display_price(), "$12.99");
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let table = MenuTable::open_in_memory().await.unwrap();
        let greek = item("Greek Salad", 12.99, "starters");
        table.insert_item(&greek).await.unwrap();
        let err = table.insert_item(&greek).await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(table.all_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_items_keeps_rows_before_failure() {
        let table = MenuTable::open_in_memory().await.unwrap();
        let items = vec![
            item("Greek Salad", 12.99, "starters"),
            item("Bruschetta", 7.99, "starters"),
            item("Greek Salad", 1.0, "mains"),
        ];
        assert!(table.store_items(&items).await.is_err());
        assert_eq!(table.all_items().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_filter_by_name_and_category() {
        let table = MenuTable::open_in_memory().await.unwrap();
        table.store_items(&sample()).await.unwrap();

        let by_name = table.filter_items("gr", &[]).await.unwrap();
        let names: Vec<&str> = by_name.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Greek Salad", "Grilled Fish"]);

        let both = table
            .filter_items("gr", &["mains".to_string()])
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].name, "Grilled Fish");

        let by_category = table
            .filter_items("", &["starters".to_string(), "desserts".to_string()])
            .await
            .unwrap();
        assert_eq!(by_category.len(), 3);

        assert_eq!(table.filter_items("", &[]).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_open_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("LittleLemonDB.db");
        {
            let table = MenuTable::open(&path).await.unwrap();
            table.store_items(&sample()).await.unwrap();
        }
        let table = MenuTable::open(&path).await.unwrap();
        assert_eq!(table.all_items().await.unwrap().len(), 4);
    }
}
