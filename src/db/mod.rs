//! Persistence for the book table, split by backend. Both backends hold the
//! same five columns and always read or write the whole table at once.

mod books;
mod connection;
mod csv_file;

use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::Book;

pub use books::SqliteStore;
pub(crate) use connection::ensure_parent_dir;
pub use connection::default_data_dir;
pub use csv_file::CsvStore;

/// Whole-table persistence. Implementations never keep rows between calls:
/// `load` reads everything, `save` overwrites everything.
pub trait BookStore {
    /// Path of the backing file, used for logging and status messages.
    fn location(&self) -> &Path;

    /// Create the backing file with an empty table if it does not exist yet.
    /// Existing data is left untouched.
    fn initialize(&self) -> Result<(), StoreError>;

    /// Read the full table. A missing backing file yields an empty table.
    fn load(&self) -> Result<Vec<Book>, StoreError>;

    /// Replace the backing file contents with `books`, in order.
    fn save(&self, books: &[Book]) -> Result<(), StoreError>;
}

impl<S: BookStore + ?Sized> BookStore for Box<S> {
    fn location(&self) -> &Path {
        (**self).location()
    }

    fn initialize(&self) -> Result<(), StoreError> {
        (**self).initialize()
    }

    fn load(&self) -> Result<Vec<Book>, StoreError> {
        (**self).load()
    }

    fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        (**self).save(books)
    }
}

/// Backend chosen for a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Csv,
    Sqlite,
}

impl StoreKind {
    /// Pick the backend from the file extension. Anything that is not a
    /// SQLite extension is treated as a CSV file.
    pub fn for_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("sqlite") | Some("sqlite3") | Some("db") => StoreKind::Sqlite,
            _ => StoreKind::Csv,
        }
    }
}

/// Build the store matching the data file's extension.
pub fn open_store(path: impl Into<PathBuf>) -> Box<dyn BookStore> {
    let path = path.into();
    match StoreKind::for_path(&path) {
        StoreKind::Csv => Box::new(CsvStore::new(path)),
        StoreKind::Sqlite => Box::new(SqliteStore::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_follows_extension() {
        assert_eq!(StoreKind::for_path(Path::new("books.csv")), StoreKind::Csv);
        assert_eq!(StoreKind::for_path(Path::new("books.DB")), StoreKind::Sqlite);
        assert_eq!(
            StoreKind::for_path(Path::new("data/books.sqlite3")),
            StoreKind::Sqlite
        );
        assert_eq!(StoreKind::for_path(Path::new("books")), StoreKind::Csv);
    }

    #[test]
    fn boxed_store_reports_its_path() {
        let store = open_store("library_data.csv");
        assert_eq!(store.location(), Path::new("library_data.csv"));
    }
}
