//! Request-style operations over an injected [`BookStore`].
//!
//! Every call reloads the whole table, applies one change in memory and
//! writes the whole table back. Nothing is locked between the load and the
//! save: two processes working on the same file can overwrite each other's
//! changes, and the last save wins.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::db::BookStore;
use crate::inventory::{self, IssueOutcome, ReturnOutcome};
use crate::models::Book;
use crate::search;

pub struct Library<S: BookStore> {
    store: S,
}

impl<S: BookStore> Library<S> {
    /// Wrap `store`, creating its backing file if it does not exist yet.
    pub fn open(store: S) -> Result<Self> {
        store.initialize().with_context(|| {
            format!(
                "failed to initialize book table at {}",
                store.location().display()
            )
        })?;
        info!(path = %store.location().display(), "book table ready");
        Ok(Self { store })
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Full table in stored order.
    pub fn books(&self) -> Result<Vec<Book>> {
        self.store
            .load()
            .inspect_err(|err| error!(error = %err, "failed to load books"))
            .context("failed to load books")
    }

    /// Books matching `query`; an empty query lists everything.
    pub fn search(&self, query: &str) -> Result<Vec<Book>> {
        let books = self.books()?;
        Ok(search::search(&books, query))
    }

    pub fn add_book(&self, book_id: &str, title: &str, author: &str) -> Result<()> {
        let mut books = self.books()?;
        inventory::add(&mut books, book_id, title, author);
        self.persist(&books)?;
        info!(book_id, title, "book added");
        Ok(())
    }

    /// Lend a book. The table is only written when the book changed hands.
    pub fn issue_book(&self, book_id: &str, holder: &str) -> Result<IssueOutcome> {
        let mut books = self.books()?;
        let outcome = inventory::issue(&mut books, book_id, holder);
        match outcome {
            IssueOutcome::Issued => {
                self.persist(&books)?;
                info!(book_id, holder, "book issued");
            }
            IssueOutcome::AlreadyIssued => warn!(book_id, "book is already issued"),
            IssueOutcome::NotFound => warn!(book_id, "issue requested for unknown book"),
        }
        Ok(outcome)
    }

    /// Record a return. Returning a book that is already on the shelf still
    /// succeeds.
    pub fn return_book(&self, book_id: &str) -> Result<ReturnOutcome> {
        let mut books = self.books()?;
        let outcome = inventory::return_book(&mut books, book_id);
        match outcome {
            ReturnOutcome::Returned => {
                self.persist(&books)?;
                info!(book_id, "book returned");
            }
            ReturnOutcome::NotFound => warn!(book_id, "return requested for unknown book"),
        }
        Ok(outcome)
    }

    fn persist(&self, books: &[Book]) -> Result<()> {
        self.store
            .save(books)
            .inspect_err(|err| error!(error = %err, "failed to save books"))
            .with_context(|| {
                format!("failed to save books to {}", self.store.location().display())
            })
    }
}
