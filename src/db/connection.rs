use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;
use rusqlite::Connection;

use crate::error::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-tracker";

/// Resolve the application data directory inside the user's home.
pub fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Create the directory that will hold `path`, if it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))
        }
        _ => Ok(()),
    }
}

/// Open (creating if needed) the SQLite file and make sure the `books` table
/// exists. Column names mirror the CSV header row so both backends describe
/// the same table.
pub(crate) fn open_database(path: &Path) -> Result<Connection, StoreError> {
    ensure_parent_dir(path)?;

    let conn = Connection::open(path)?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            position INTEGER PRIMARY KEY,
            BookID TEXT NOT NULL,
            Title TEXT NOT NULL,
            Author TEXT NOT NULL,
            Status TEXT NOT NULL,
            IssuedTo TEXT
        )",
        [],
    )?;

    Ok(conn)
}

/// Whether an existing database already has the `books` table.
pub(crate) fn has_books_table(conn: &Connection) -> Result<bool, StoreError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'books'",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
