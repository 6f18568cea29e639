use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Writer};

use crate::error::StoreError;
use crate::models::{parse_holder, Book, BookStatus, COLUMNS};

use super::connection::ensure_parent_dir;
use super::BookStore;

/// Book table kept in a plain CSV file with a `BookID,Title,Author,Status,IssuedTo`
/// header row. Every value is read and written as text.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BookStore for CsvStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn initialize(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        ensure_parent_dir(&self.path)?;
        self.save(&[])
    }

    fn load(&self) -> Result<Vec<Book>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };
        read_books(file)
    }

    fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        let file = File::create(&self.path).map_err(|err| StoreError::io(&self.path, err))?;
        write_books(file, books).map_err(|err| match err {
            WriteError::Csv(err) => StoreError::Csv(err),
            WriteError::Io(err) => StoreError::io(&self.path, err),
        })
    }
}

/// Positions of the known columns within the header row. Columns may appear
/// in any order; unknown columns are ignored.
struct ColumnLayout {
    book_id: usize,
    title: usize,
    author: usize,
    status: usize,
    issued_to: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, StoreError> {
        let find = |name: &str| headers.iter().position(|header| header.trim() == name);
        let require = |name: &'static str| find(name).ok_or(StoreError::MissingColumn(name));

        Ok(Self {
            book_id: require(COLUMNS[0])?,
            title: require(COLUMNS[1])?,
            author: require(COLUMNS[2])?,
            status: require(COLUMNS[3])?,
            issued_to: find(COLUMNS[4]),
        })
    }

    /// Turn one data row into a book. Short rows read their missing cells as
    /// empty text; an unrecognised status rejects the row.
    fn book_from(&self, record: &StringRecord, row: usize) -> Result<Book, StoreError> {
        let cell = |index: usize| record.get(index).unwrap_or("").to_string();

        let status = record
            .get(self.status)
            .unwrap_or("")
            .parse::<BookStatus>()
            .map_err(|reason| StoreError::MalformedRow { row, reason })?;

        Ok(Book {
            book_id: cell(self.book_id),
            title: cell(self.title),
            author: cell(self.author),
            status,
            issued_to: parse_holder(self.issued_to.and_then(|index| record.get(index))),
        })
    }
}

fn read_books<R: Read>(source: R) -> Result<Vec<Book>, StoreError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
    let layout = ColumnLayout::from_headers(reader.headers()?)?;

    let mut books = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .position()
            .map(|position| position.line() as usize)
            .unwrap_or(books.len() + 2);
        books.push(layout.book_from(&record, row)?);
    }
    Ok(books)
}

enum WriteError {
    Csv(csv::Error),
    Io(io::Error),
}

fn write_books<W: Write>(sink: W, books: &[Book]) -> Result<(), WriteError> {
    let mut writer = Writer::from_writer(sink);
    writer.write_record(COLUMNS).map_err(WriteError::Csv)?;
    for book in books {
        writer
            .write_record([
                book.book_id.as_str(),
                book.title.as_str(),
                book.author.as_str(),
                book.status.as_str(),
                book.holder_label(),
            ])
            .map_err(WriteError::Csv)?;
    }
    writer.flush().map_err(WriteError::Io)
}
