use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params, Connection};

use crate::error::StoreError;
use crate::models::{parse_holder, Book, BookStatus};

use super::connection::{has_books_table, open_database};
use super::BookStore;

/// Book table stored in a single SQLite table. A connection is opened per
/// call, so the store behaves like the CSV file: load everything, save
/// everything.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BookStore for SqliteStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn initialize(&self) -> Result<(), StoreError> {
        open_database(&self.path).map(|_| ())
    }

    fn load(&self) -> Result<Vec<Book>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let conn = Connection::open(&self.path)?;
        if !has_books_table(&conn)? {
            return Ok(Vec::new());
        }
        fetch_books(&conn)
    }

    fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        let mut conn = open_database(&self.path)?;
        replace_books(&mut conn, books)
    }
}

/// Read every row in insertion order. Cells are coerced to text so an ID that
/// some other tool stored as an integer still comes back as "101".
fn fetch_books(conn: &Connection) -> Result<Vec<Book>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT position, BookID, Title, Author, Status, IssuedTo
         FROM books
         ORDER BY position",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Value>(1)?,
                row.get::<_, Value>(2)?,
                row.get::<_, Value>(3)?,
                row.get::<_, Value>(4)?,
                row.get::<_, Value>(5)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(position, book_id, title, author, status, issued_to)| {
            let status = text_cell(status)
                .unwrap_or_default()
                .parse::<BookStatus>()
                .map_err(|reason| StoreError::MalformedRow {
                    row: position as usize,
                    reason,
                })?;
            Ok(Book {
                book_id: text_cell(book_id).unwrap_or_default(),
                title: text_cell(title).unwrap_or_default(),
                author: text_cell(author).unwrap_or_default(),
                status,
                issued_to: parse_holder(text_cell(issued_to).as_deref()),
            })
        })
        .collect()
}

/// Overwrite the table in one transaction so a failed write leaves the
/// previous contents in place.
fn replace_books(conn: &mut Connection, books: &[Book]) -> Result<(), StoreError> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM books", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO books (position, BookID, Title, Author, Status, IssuedTo)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (index, book) in books.iter().enumerate() {
            let position = index as i64 + 1;
            stmt.execute(params![
                position,
                book.book_id,
                book.title,
                book.author,
                book.status.as_str(),
                book.holder_label(),
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

fn text_cell(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(number) => Some(number.to_string()),
        Value::Real(number) => Some(number.to_string()),
        Value::Text(text) => Some(text),
        Value::Blob(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ids_written_by_other_tools_load_as_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("books.sqlite");
        let conn = open_database(&path).expect("open");
        conn.execute(
            "INSERT INTO books (position, BookID, Title, Author, Status, IssuedTo)
             VALUES (1, 101, 'Dune', 'Herbert', 'Available', NULL)",
            [],
        )
        .expect("insert");

        let books = SqliteStore::new(&path).load().expect("load");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].book_id, "101");
        assert_eq!(books[0].issued_to, None);
    }

    #[test]
    fn unknown_status_is_rejected_with_its_position() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("books.db");
        let conn = open_database(&path).expect("open");
        conn.execute(
            "INSERT INTO books (position, BookID, Title, Author, Status, IssuedTo)
             VALUES (4, '7', 'Emma', 'Austen', 'Missing', 'None')",
            [],
        )
        .expect("insert");

        let err = SqliteStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::MalformedRow { row: 4, .. }));
    }

    #[test]
    fn database_without_books_table_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.sqlite");
        Connection::open(&path).expect("create file");

        assert!(SqliteStore::new(&path).load().expect("load").is_empty());
    }
}
