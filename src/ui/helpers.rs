use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Row};

use crate::models::{Book, BookStatus};

/// Header labels for the book table, matching the persisted column names.
pub(crate) const BOOK_HEADERS: [&str; 5] = ["Book ID", "Title", "Author", "Status", "Issued To"];

/// Relative widths of the five book table columns.
pub(crate) const BOOK_WIDTHS: [Constraint; 5] = [
    Constraint::Length(10),
    Constraint::Percentage(35),
    Constraint::Percentage(25),
    Constraint::Length(10),
    Constraint::Percentage(20),
];

/// Build one table row for a book, coloring the status cell.
pub(crate) fn book_row(book: &Book) -> Row<'static> {
    let status_style = match book.status {
        BookStatus::Available => Style::default().fg(Color::Green),
        BookStatus::Issued => Style::default().fg(Color::Red),
    };
    let holder_style = if book.issued_to.is_some() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Row::new(vec![
        Cell::from(book.book_id.clone()),
        Cell::from(book.title.clone()),
        Cell::from(book.author.clone()),
        Cell::from(Span::styled(book.status.as_str(), status_style)),
        Cell::from(Span::styled(book.holder_label().to_string(), holder_style)),
    ])
}

/// Bold header row for the book table.
pub(crate) fn book_header() -> Row<'static> {
    Row::new(BOOK_HEADERS.to_vec()).style(Style::default().add_modifier(Modifier::BOLD))
}

/// A row of `[key] Label` hints for the footer.
pub(crate) fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (index, (key, label)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, key_style));
        if index + 1 == hints.len() {
            spans.push(Span::raw(format!(" {label}")));
        } else {
            spans.push(Span::raw(format!(" {label}   ")));
        }
    }
    Line::from(spans)
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
