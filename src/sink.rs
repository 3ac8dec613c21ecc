//! Record sinks receiving the deduplicated items of a run.
//!
//! Every run replaces the sink contents wholesale. The SQLite sink stages the
//! delete and the inserts in one transaction, so readers see either the old
//! set or the new one, never an empty table.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::catalog::NormalizedItem;
use crate::error::{IngestError, Result};

/// Destination for normalized item metadata
pub trait RecordSink {
    /// Replace all stored records with `items`, in order
    fn replace_all(&mut self, items: &[NormalizedItem]) -> Result<()>;
}

const ITEMS_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        author TEXT NOT NULL,
        subject TEXT NOT NULL,
        year INTEGER,
        abstract TEXT NOT NULL,
        tags TEXT NOT NULL,
        availability TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_items_title_author ON items(title, author);
";

/// SQLite-backed item store
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Open (or create) the database file and ensure the schema exists
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    IngestError::io(e, format!("Failed to create database directory: {:?}", parent))
                })?;
            }
        }
        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(ITEMS_SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All stored items in insertion order
    pub fn load_all(&self) -> Result<Vec<NormalizedItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, author, subject, year, abstract, tags, availability
             FROM items ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let year: Option<i64> = row.get(3)?;
            Ok(NormalizedItem {
                title: row.get(0)?,
                author: row.get(1)?,
                subject: row.get(2)?,
                year: year.map(|y| y.to_string()),
                abstract_text: row.get(4)?,
                tags: row.get(5)?,
                availability: row.get(6)?,
            })
        })?;
        let items = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(items)
    }
}

impl RecordSink for SqliteSink {
    fn replace_all(&mut self, items: &[NormalizedItem]) -> Result<()> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM items", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO items (title, author, subject, year, abstract, tags, availability)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for item in items {
                insert.execute(params![
                    item.title,
                    item.author,
                    item.subject,
                    item.year_number(),
                    item.abstract_text,
                    item.tags,
                    item.availability,
                ])?;
            }
        }
        tx.commit()?;
        debug!("Record sink cleared {} rows", removed);
        info!("Record sink now holds {} items", items.len());
        Ok(())
    }
}

/// In-process sink, keeps the last batch it was given
#[derive(Debug, Default)]
pub struct MemorySink {
    pub items: Vec<NormalizedItem>,
    /// number of `replace_all` calls
    pub replacements: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn replace_all(&mut self, items: &[NormalizedItem]) -> Result<()> {
        self.items = items.to_vec();
        self.replacements += 1;
        Ok(())
    }
}
