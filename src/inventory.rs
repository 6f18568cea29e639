//! State transitions on single records of the book table.
//!
//! Lookups always resolve to the first row whose ID equals the requested one,
//! so a duplicated ID shadows the later rows.

use crate::models::{Book, BookStatus};

/// Result of trying to lend a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueOutcome {
    Issued,
    AlreadyIssued,
    NotFound,
}

/// Result of recording a return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    Returned,
    NotFound,
}

/// Append a new available book. Duplicate IDs are accepted as-is.
pub fn add(books: &mut Vec<Book>, book_id: &str, title: &str, author: &str) {
    books.push(Book::new(book_id, title, author));
}

/// First book whose ID equals `book_id`, compared as text.
pub fn find_mut<'a>(books: &'a mut [Book], book_id: &str) -> Option<&'a mut Book> {
    books.iter_mut().find(|book| book.book_id == book_id)
}

/// Lend a book to `holder`. Only an available book changes state.
pub fn issue(books: &mut [Book], book_id: &str, holder: &str) -> IssueOutcome {
    let Some(book) = find_mut(books, book_id) else {
        return IssueOutcome::NotFound;
    };
    if book.status != BookStatus::Available {
        return IssueOutcome::AlreadyIssued;
    }
    book.status = BookStatus::Issued;
    book.issued_to = Some(holder.to_string());
    IssueOutcome::Issued
}

/// Put a book back on the shelf regardless of its current state.
pub fn return_book(books: &mut [Book], book_id: &str) -> ReturnOutcome {
    let Some(book) = find_mut(books, book_id) else {
        return ReturnOutcome::NotFound;
    };
    book.status = BookStatus::Available;
    book.issued_to = None;
    ReturnOutcome::Returned
}
