//! Core library surface for the Library Tracker TUI.
//!
//! The book table lives in a single CSV or SQLite file. [`db`] reads and
//! writes it whole, [`search`] and [`inventory`] work on the in-memory rows,
//! and [`library::Library`] ties them together as one load/change/save cycle
//! per operation for the terminal UI.
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod inventory;
pub mod library;
pub mod logging;
pub mod models;
pub mod search;
pub mod ui;

/// Persistence entry points used by `main.rs` and by tooling that wants to
/// read the same file.
pub use db::{open_store, BookStore, CsvStore, SqliteStore};

pub use auth::{CredentialVerifier, StaticCredentials};
pub use config::{Cli, Config};
pub use error::StoreError;
pub use inventory::{IssueOutcome, ReturnOutcome};
pub use library::Library;
pub use models::{Book, BookStatus};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
