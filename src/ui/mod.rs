//! Ratatui front-end: a public catalog, a librarian login, and the dashboard
//! where books are added, issued and returned.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
