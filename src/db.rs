use anyhow::{anyhow, Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::entities::{Stock, StockType, Store};

// ============================================================================
// DATABASE HANDLE
// ============================================================================

/// Shared SQLite connection
///
/// Every read and write goes through the one mutex, so inserts are
/// serialized and AUTOINCREMENT ids can never collide.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a file-backed database in WAL mode
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;

        // Enable WAL mode for crash recovery
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(journal_mode = %mode, "database opened");

        setup_database(&conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Fresh private in-memory database, used by tests and the default config
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        setup_database(&conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Database {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` while holding the connection lock
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))?;
        f(&conn)
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

pub fn setup_database(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS STORE (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS STOCK (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            value INTEGER NOT NULL,
            store_id INTEGER NOT NULL REFERENCES STORE(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_stock_store ON STOCK(store_id)",
        [],
    )?;

    Ok(())
}

// ============================================================================
// STORES
// ============================================================================

pub fn insert_store(conn: &Connection, name: &str) -> Result<Store> {
    conn.execute("INSERT INTO STORE (name) VALUES (?1)", params![name])
        .context("Failed to insert store")?;

    Ok(Store {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn get_store(conn: &Connection, id: i64) -> Result<Option<Store>> {
    let store = conn
        .query_row("SELECT id, name FROM STORE WHERE id = ?1", params![id], |row| {
            Ok(Store {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .optional()?;

    Ok(store)
}

pub fn store_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM STORE WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

// ============================================================================
// STOCKS
// ============================================================================

/// Insert a stock and return it with the id SQLite assigned.
/// Any `id` already on `stock` is ignored.
pub fn insert_stock(conn: &Connection, stock: &Stock) -> Result<Stock> {
    conn.execute(
        "INSERT INTO STOCK (name, type, value, store_id) VALUES (?1, ?2, ?3, ?4)",
        params![
            stock.name,
            stock.stock_type.as_str(),
            stock.value,
            stock.store_id
        ],
    )
    .context("Failed to insert stock")?;

    Ok(Stock {
        id: conn.last_insert_rowid(),
        ..stock.clone()
    })
}

pub fn get_stock(conn: &Connection, id: i64) -> Result<Option<Stock>> {
    let stock = conn
        .query_row(
            "SELECT id, name, type, value, store_id FROM STOCK WHERE id = ?1",
            params![id],
            stock_from_row,
        )
        .optional()?;

    Ok(stock)
}

/// Stocks of one store, oldest first
pub fn get_stocks_by_store(conn: &Connection, store_id: i64) -> Result<Vec<Stock>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, value, store_id
         FROM STOCK
         WHERE store_id = ?1
         ORDER BY id ASC",
    )?;

    let stocks = stmt
        .query_map(params![store_id], stock_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(stocks)
}

pub fn count_stocks(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM STOCK", [], |row| row.get(0))?;

    Ok(count)
}

fn stock_from_row(row: &Row<'_>) -> rusqlite::Result<Stock> {
    let type_name: String = row.get(2)?;
    let stock_type = StockType::parse(&type_name).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown stock type {type_name:?}").into(),
        )
    })?;

    Ok(Stock {
        id: row.get(0)?,
        name: row.get(1)?,
        stock_type,
        value: row.get(3)?,
        store_id: row.get(4)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
