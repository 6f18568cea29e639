//! Domain models for the book table. These stay light-weight data holders so
//! the store, the inventory operations and the TUI can pass them around freely
//! while persistence details (column names, the `None` sentinel) live next to
//! the types they describe.

use std::fmt;
use std::str::FromStr;

/// Column headers of the backing file, in the order they are written.
pub const COLUMNS: [&str; 5] = ["BookID", "Title", "Author", "Status", "IssuedTo"];

/// Text written into the `IssuedTo` column when nobody holds the book.
pub const NO_HOLDER: &str = "None";

/// Circulation state of a single book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookStatus {
    #[default]
    Available,
    Issued,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Issued => "Issued",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    /// Parse the persisted status text. Surrounding whitespace is ignored but
    /// the comparison is case-sensitive, matching what `save` writes.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "Available" => Ok(BookStatus::Available),
            "Issued" => Ok(BookStatus::Issued),
            other => Err(format!("unknown status {other:?}")),
        }
    }
}

/// One row of the book table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Identifier typed in by the librarian. Always kept as text so "101" and
    /// "0101" stay distinct and never round-trip through a number.
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub status: BookStatus,
    /// Name of the student holding the book, `None` while it is on the shelf.
    pub issued_to: Option<String>,
}

impl Book {
    /// Build a freshly catalogued book: available and not held by anyone.
    pub fn new(
        book_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            title: title.into(),
            author: author.into(),
            status: BookStatus::Available,
            issued_to: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Holder text as persisted and displayed, using the `None` sentinel.
    pub fn holder_label(&self) -> &str {
        self.issued_to.as_deref().unwrap_or(NO_HOLDER)
    }
}

/// Interpret a raw `IssuedTo` cell. Empty cells and the sentinel both mean the
/// book has no holder.
pub fn parse_holder(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        None | Some("") | Some(NO_HOLDER) => None,
        Some(name) => Some(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_is_available_without_holder() {
        let book = Book::new("101", "Dune", "Herbert");
        assert!(book.is_available());
        assert_eq!(book.issued_to, None);
        assert_eq!(book.holder_label(), "None");
    }

    #[test]
    fn status_parsing_is_strict_about_case() {
        assert_eq!(" Issued ".parse::<BookStatus>(), Ok(BookStatus::Issued));
        assert_eq!("Available".parse::<BookStatus>(), Ok(BookStatus::Available));
        assert!("issued".parse::<BookStatus>().is_err());
        assert!("Lost".parse::<BookStatus>().is_err());
    }

    #[test]
    fn holder_sentinel_and_blank_cells_mean_nobody() {
        assert_eq!(parse_holder(None), None);
        assert_eq!(parse_holder(Some("")), None);
        assert_eq!(parse_holder(Some("None")), None);
        assert_eq!(parse_holder(Some(" Alice ")), Some("Alice".to_string()));
    }
}
