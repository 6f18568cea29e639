use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::auth::CredentialVerifier;
use crate::db::BookStore;
use crate::inventory::{IssueOutcome, ReturnOutcome};
use crate::library::Library;

use super::forms::{BookField, BookForm, LoanForm, LoanKind, LoginField, LoginForm};
use super::helpers::{book_header, book_row, centered_rect, key_hints, surface_error, BOOK_WIDTHS};
use super::screens::BookListScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp / PageDown.
const PAGE_STEP: isize = 10;

/// Top-level views. The catalog is public; the dashboard is only reachable
/// through a successful login and carries the librarian actions.
enum Screen {
    Catalog(BookListScreen),
    Dashboard(BookListScreen),
}

impl Screen {
    fn list(&self) -> &BookListScreen {
        match self {
            Screen::Catalog(list) | Screen::Dashboard(list) => list,
        }
    }

    fn list_mut(&mut self) -> &mut BookListScreen {
        match self {
            Screen::Catalog(list) | Screen::Dashboard(list) => list,
        }
    }
}

/// Modal state layered over the current screen.
enum Mode {
    Normal,
    LoggingIn(LoginForm),
    AddingBook(BookForm),
    Lending(LoanForm),
    Searching(SearchState),
}

/// State for an active inline search.
struct SearchState {
    query: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    library: Library<Box<dyn BookStore>>,
    verifier: Box<dyn CredentialVerifier>,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Start on the public catalog with the current contents of the table.
    pub fn new(
        library: Library<Box<dyn BookStore>>,
        verifier: Box<dyn CredentialVerifier>,
    ) -> Result<Self> {
        let books = library.books()?;
        Ok(Self {
            library,
            verifier,
            screen: Screen::Catalog(BookListScreen::new(books)),
            mode: Mode::Normal,
            status: None,
        })
    }

    /// Process one key press. Returns `true` once the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::LoggingIn(form) => self.handle_login(code, form),
            Mode::AddingBook(form) => self.handle_add_book(code, form),
            Mode::Lending(form) => self.handle_loan(code, form),
            Mode::Searching(state) => self.handle_search(code, state),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
                return Mode::Normal;
            }
            KeyCode::Up => self.screen.list_mut().move_selection(-1),
            KeyCode::Down => self.screen.list_mut().move_selection(1),
            KeyCode::PageUp => self.screen.list_mut().move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.screen.list_mut().move_selection(PAGE_STEP),
            KeyCode::Home => self.screen.list_mut().select_first(),
            KeyCode::End => self.screen.list_mut().select_last(),
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.refresh_books();
                let query = self.screen.list().filter.clone().unwrap_or_default();
                return Mode::Searching(SearchState { query });
            }
            _ => {}
        }

        match self.screen {
            Screen::Catalog(_) => match code {
                KeyCode::Esc => {
                    if self.screen.list().has_filter() {
                        self.screen.list_mut().set_filter(None);
                        self.clear_status();
                    } else {
                        *exit = true;
                    }
                }
                KeyCode::Char('l') | KeyCode::Char('L') => {
                    self.clear_status();
                    return Mode::LoggingIn(LoginForm::default());
                }
                _ => {}
            },
            Screen::Dashboard(_) => match code {
                KeyCode::Esc => {
                    if self.screen.list().has_filter() {
                        self.screen.list_mut().set_filter(None);
                        self.clear_status();
                    }
                }
                KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.clear_status();
                    return Mode::AddingBook(BookForm::default());
                }
                KeyCode::Char('i') | KeyCode::Char('I') => {
                    self.clear_status();
                    return Mode::Lending(LoanForm::new(
                        LoanKind::Issue,
                        self.selected_book_id().as_deref(),
                    ));
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.clear_status();
                    return Mode::Lending(LoanForm::new(
                        LoanKind::Return,
                        self.selected_book_id().as_deref(),
                    ));
                }
                KeyCode::Char('o') | KeyCode::Char('O') => self.logout(),
                _ => {}
            },
        }

        Mode::Normal
    }

    fn handle_login(&mut self, code: KeyCode, mut form: LoginForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Login cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if form.active == LoginField::Username && form.password.is_empty() {
                    form.toggle_field();
                    return Mode::LoggingIn(form);
                }
                if self.verifier.verify(&form.username, &form.password) {
                    info!(username = %form.username, "librarian logged in");
                    self.login();
                    return Mode::Normal;
                }
                warn!(username = %form.username, "rejected login attempt");
                form.reject("Invalid credentials!");
                self.set_status("Invalid credentials!", StatusKind::Error);
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::LoggingIn(form)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.toggle_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(()) => return Mode::Normal,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingBook(form)
    }

    fn handle_loan(&mut self, code: KeyCode, mut form: LoanForm) -> Mode {
        match code {
            KeyCode::Esc => {
                let message = match form.kind {
                    LoanKind::Issue => "Issue cancelled.",
                    LoanKind::Return => "Return cancelled.",
                };
                self.set_status(message, StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let submitted = match form.kind {
                    LoanKind::Issue => self.submit_issue(&form),
                    LoanKind::Return => self.submit_return(&form),
                };
                match submitted {
                    Ok(()) => return Mode::Normal,
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Lending(form)
    }

    /// Typing re-runs the search against a freshly loaded table. Enter keeps
    /// the filter, Esc drops it.
    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        let list = self.screen.list_mut();
        match code {
            KeyCode::Esc => {
                list.set_filter(None);
                return Mode::Normal;
            }
            KeyCode::Enter => return Mode::Normal,
            KeyCode::Up => {
                list.move_selection(-1);
                return Mode::Searching(state);
            }
            KeyCode::Down => {
                list.move_selection(1);
                return Mode::Searching(state);
            }
            KeyCode::PageUp => {
                list.move_selection(-PAGE_STEP);
                return Mode::Searching(state);
            }
            KeyCode::PageDown => {
                list.move_selection(PAGE_STEP);
                return Mode::Searching(state);
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => return Mode::Searching(state),
        }

        let filter = Some(state.query.clone()).filter(|query| !query.is_empty());
        self.screen.list_mut().set_filter(filter);
        self.refresh_books();
        Mode::Searching(state)
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let (book_id, title, author) = form.parse_inputs()?;
        self.library.add_book(&book_id, &title, &author)?;
        self.reload_books()?;
        let list = self.screen.list_mut();
        list.select_last();
        self.set_status("Book added successfully!", StatusKind::Info);
        Ok(())
    }

    fn submit_issue(&mut self, form: &LoanForm) -> Result<()> {
        let (book_id, student) = form.parse_issue()?;
        let outcome = self.library.issue_book(&book_id, &student)?;
        self.reload_books()?;
        self.screen.list_mut().select_book(&book_id);
        match outcome {
            IssueOutcome::Issued => {
                self.set_status(format!("Book issued to {student}"), StatusKind::Info)
            }
            IssueOutcome::AlreadyIssued => {
                self.set_status("Book is already issued!", StatusKind::Warning)
            }
            IssueOutcome::NotFound => self.set_status("Book ID not found.", StatusKind::Error),
        }
        Ok(())
    }

    fn submit_return(&mut self, form: &LoanForm) -> Result<()> {
        let book_id = form.parse_book_id()?;
        let outcome = self.library.return_book(&book_id)?;
        self.reload_books()?;
        self.screen.list_mut().select_book(&book_id);
        match outcome {
            ReturnOutcome::Returned => {
                self.set_status("Book returned successfully.", StatusKind::Info)
            }
            ReturnOutcome::NotFound => self.set_status("Book ID not found.", StatusKind::Error),
        }
        Ok(())
    }

    /// Switch to the dashboard. If the table cannot be read the catalog stays
    /// up and the cause goes to the footer.
    fn login(&mut self) {
        match self.library.books() {
            Ok(books) => {
                self.screen = Screen::Dashboard(BookListScreen::new(books));
                self.set_status("Logged in.", StatusKind::Info);
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn logout(&mut self) {
        match self.library.books() {
            Ok(books) => {
                self.screen = Screen::Catalog(BookListScreen::new(books));
                info!("librarian logged out");
                self.set_status("Logged out.", StatusKind::Info);
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn reload_books(&mut self) -> Result<()> {
        let books = self.library.books()?;
        self.screen.list_mut().set_books(books);
        Ok(())
    }

    /// Reload for display only; a read failure keeps the previous rows.
    fn refresh_books(&mut self) {
        if let Err(err) = self.reload_books() {
            self.set_status(surface_error(&err), StatusKind::Error);
        }
    }

    fn selected_book_id(&self) -> Option<String> {
        self.screen
            .list()
            .current_book()
            .map(|book| book.book_id.clone())
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let title = match self.screen {
            Screen::Catalog(_) => "Library Catalog",
            Screen::Dashboard(_) => "Librarian Dashboard",
        };
        self.draw_book_list(frame, content_area, title, self.screen.list());

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::LoggingIn(form) => self.draw_login_form(frame, area, form),
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::Lending(form) => self.draw_loan_form(frame, area, form),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_book_list(&self, frame: &mut Frame, area: Rect, title: &str, list: &BookListScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let mut summary = vec![Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        summary.push(Span::raw(format!(
            "  •  {} books, {} issued",
            list.books.len(),
            list.issued_count()
        )));
        if let Some(query) = list.filter.as_ref().filter(|query| !query.is_empty()) {
            summary.push(Span::styled(
                format!("  •  search \"{query}\": {} found", list.filtered_books.len()),
                Style::default().fg(Color::Yellow),
            ));
        }
        let header = Paragraph::new(Line::from(summary))
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        if list.books.is_empty() {
            let message = match self.screen {
                Screen::Catalog(_) => "No books yet. Log in with 'l' to add some.",
                Screen::Dashboard(_) => "No books yet. Press '+' to add one.",
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Books"));
            frame.render_widget(paragraph, chunks[1]);
            return;
        }

        if list.filtered_books.is_empty() {
            let paragraph = Paragraph::new("No books match the current search.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Books"));
            frame.render_widget(paragraph, chunks[1]);
            return;
        }

        let rows: Vec<_> = list.filtered_books.iter().map(book_row).collect();
        let table = Table::new(rows, BOOK_WIDTHS)
            .header(book_header())
            .block(Block::default().borders(Borders::ALL).title("Books"))
            .row_highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(list.selected));
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match (&self.screen, &self.mode) {
            (_, Mode::Searching(_)) => key_hints(&[
                ("[↑↓]", "Select"),
                ("[Enter]", "Keep Filter"),
                ("[Esc]", "Clear"),
            ]),
            (_, Mode::LoggingIn(_)) | (_, Mode::AddingBook(_)) | (_, Mode::Lending(_)) => {
                key_hints(&[
                    ("[Tab]", "Next Field"),
                    ("[Enter]", "Submit"),
                    ("[Esc]", "Cancel"),
                ])
            }
            (Screen::Catalog(_), Mode::Normal) => key_hints(&[
                ("[↑↓]", "Select"),
                ("[f]", "Search"),
                ("[l]", "Librarian Login"),
                ("[q]", "Quit"),
            ]),
            (Screen::Dashboard(_), Mode::Normal) => key_hints(&[
                ("[↑↓]", "Select"),
                ("[f]", "Search"),
                ("[+]", "Add Book"),
                ("[i]", "Issue"),
                ("[r]", "Return"),
                ("[o]", "Logout"),
                ("[q]", "Quit"),
            ]),
        }
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let column = "Search: ".len() + state.query.chars().count();
        frame.set_cursor_position(cursor_in(inner, column, 0));
    }

    fn draw_login_form(&self, frame: &mut Frame, area: Rect, form: &LoginForm) {
        let popup_area = centered_rect(50, 35, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Librarian Login")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(LoginField::Username),
            form.build_line(LoginField::Password),
            Line::from(""),
        ];
        lines.push(form_hint(form.error.as_deref(), "Enter to log in • Esc to cancel"));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let (prefix, row) = match form.active {
            LoginField::Username => ("Username: ".len(), 0),
            LoginField::Password => ("Password: ".len(), 1),
        };
        frame.set_cursor_position(cursor_in(inner, prefix + form.value_len(form.active), row));
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Book ID", BookField::BookId),
            form.build_line("Title", BookField::Title),
            form.build_line("Author", BookField::Author),
            Line::from(""),
        ];
        lines.push(form_hint(
            form.error.as_deref(),
            "Enter to save • Tab to switch • Esc to cancel",
        ));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let (prefix, row) = match form.active {
            BookField::BookId => ("Book ID: ".len(), 0),
            BookField::Title => ("Title: ".len(), 1),
            BookField::Author => ("Author: ".len(), 2),
        };
        frame.set_cursor_position(cursor_in(inner, prefix + form.value_len(form.active), row));
    }

    fn draw_loan_form(&self, frame: &mut Frame, area: Rect, form: &LoanForm) {
        let popup_area = centered_rect(50, 35, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(form.title()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = form.lines();
        lines.push(Line::from(""));
        let hint = match form.kind {
            LoanKind::Issue => "Enter to issue • Tab to switch • Esc to cancel",
            LoanKind::Return => "Enter to return • Esc to cancel",
        };
        lines.push(form_hint(form.error.as_deref(), hint));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let (column, row) = form.cursor();
        frame.set_cursor_position(cursor_in(inner, column, row));
    }
}

/// Cursor cell for `column`/`row` inside `inner`, pinned to its last cell when
/// the typed text runs past the edge.
fn cursor_in(inner: Rect, column: usize, row: u16) -> (u16, u16) {
    let column = u16::try_from(column).unwrap_or(u16::MAX);
    let x = inner
        .x
        .saturating_add(column)
        .min(inner.right().saturating_sub(1))
        .max(inner.x);
    let y = inner
        .y
        .saturating_add(row)
        .min(inner.bottom().saturating_sub(1))
        .max(inner.y);
    (x, y)
}

/// Error text in red when present, otherwise the gray usage hint.
fn form_hint(error: Option<&str>, hint: &'static str) -> Line<'static> {
    match error {
        Some(error) => Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::auth::StaticCredentials;
    use crate::db::open_store;
    use crate::models::BookStatus;

    fn app_with(dir: &Path, rows: &str) -> App {
        let path = dir.join("library_data.csv");
        std::fs::write(&path, format!("BookID,Title,Author,Status,IssuedTo\n{rows}"))
            .expect("seed");
        let library = Library::open(open_store(path)).expect("open");
        App::new(library, Box::new(StaticCredentials::default())).expect("app")
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).expect("key");
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(code).expect("key");
    }

    fn login(app: &mut App) {
        press(app, KeyCode::Char('l'));
        type_text(app, "admin");
        press(app, KeyCode::Tab);
        type_text(app, "pass123");
        press(app, KeyCode::Enter);
    }

    fn status(app: &App) -> Option<(&str, StatusKind)> {
        app.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.kind))
    }

    #[test]
    fn wrong_password_stays_on_login_form() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "");

        press(&mut app, KeyCode::Char('l'));
        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "nope");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::LoggingIn(_)));
        assert!(matches!(app.screen, Screen::Catalog(_)));
        assert_eq!(status(&app), Some(("Invalid credentials!", StatusKind::Error)));
    }

    #[test]
    fn correct_credentials_open_dashboard_and_logout_returns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "101,Dune,Herbert,Available,None\n");

        login(&mut app);
        assert!(matches!(app.screen, Screen::Dashboard(_)));
        assert!(matches!(app.mode, Mode::Normal));

        press(&mut app, KeyCode::Char('o'));
        assert!(matches!(app.screen, Screen::Catalog(_)));
    }

    #[test]
    fn catalog_does_not_offer_librarian_actions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "101,Dune,Herbert,Available,None\n");

        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Char('+'));
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn issue_then_reissue_then_return() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "101,Dune,Herbert,Available,None\n");
        login(&mut app);

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "Alice");
        press(&mut app, KeyCode::Enter);
        assert_eq!(status(&app), Some(("Book issued to Alice", StatusKind::Info)));
        let book = app.screen.list().current_book().cloned().expect("book");
        assert_eq!(book.status, BookStatus::Issued);
        assert_eq!(book.issued_to.as_deref(), Some("Alice"));

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "Bob");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            status(&app),
            Some(("Book is already issued!", StatusKind::Warning))
        );
        let book = app.screen.list().current_book().cloned().expect("book");
        assert_eq!(book.issued_to.as_deref(), Some("Alice"));

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            status(&app),
            Some(("Book returned successfully.", StatusKind::Info))
        );
        let book = app.screen.list().current_book().cloned().expect("book");
        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(book.issued_to, None);
    }

    #[test]
    fn unknown_id_reports_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "");
        login(&mut app);

        press(&mut app, KeyCode::Char('r'));
        type_text(&mut app, "404");
        press(&mut app, KeyCode::Enter);
        assert_eq!(status(&app), Some(("Book ID not found.", StatusKind::Error)));
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn add_book_form_validates_then_saves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "");
        login(&mut app);

        press(&mut app, KeyCode::Char('+'));
        type_text(&mut app, "102");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::AddingBook(_)));
        assert_eq!(status(&app), Some(("Title is required.", StatusKind::Error)));

        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Emma");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Austen");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(status(&app), Some(("Book added successfully!", StatusKind::Info)));
        let list = app.screen.list();
        assert_eq!(list.books.len(), 1);
        assert_eq!(list.current_book().map(|b| b.title.as_str()), Some("Emma"));
    }

    #[test]
    fn search_filters_as_you_type_and_esc_clears() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(
            dir.path(),
            "101,Dune,Herbert,Available,None\n102,Emma,Austen,Available,None\n",
        );

        press(&mut app, KeyCode::Char('f'));
        type_text(&mut app, "EMMA");
        assert_eq!(app.screen.list().filtered_books.len(), 1);

        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.screen.list().filtered_books.len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen.list().filtered_books.len(), 2);
    }

    #[test]
    fn unreadable_table_on_login_stays_on_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "101,Dune,Herbert,Available,None\n");
        std::fs::write(dir.path().join("library_data.csv"), "Name,Shelf\nDune,3\n")
            .expect("corrupt");

        press(&mut app, KeyCode::Char('l'));
        type_text(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pass123");
        app.handle_key(KeyCode::Enter).expect("login keeps running");

        assert!(matches!(app.screen, Screen::Catalog(_)));
        assert!(matches!(app.mode, Mode::Normal));
        let (text, kind) = status(&app).expect("status");
        assert_eq!(kind, StatusKind::Error);
        assert!(text.contains("BookID"), "{text}");
        assert_eq!(app.screen.list().books.len(), 1);
    }

    #[test]
    fn unreadable_table_on_logout_stays_on_dashboard() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "");
        login(&mut app);
        std::fs::write(dir.path().join("library_data.csv"), "Name,Shelf\n").expect("corrupt");

        app.handle_key(KeyCode::Char('o')).expect("logout keeps running");
        assert!(matches!(app.screen, Screen::Dashboard(_)));
        assert_eq!(status(&app).map(|(_, kind)| kind), Some(StatusKind::Error));
    }

    #[test]
    fn search_sees_books_saved_by_another_handle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "101,Dune,Herbert,Available,None\n");

        let other = Library::open(open_store(dir.path().join("library_data.csv"))).expect("open");
        other.add_book("102", "Emma", "Austen").expect("add");

        press(&mut app, KeyCode::Char('f'));
        type_text(&mut app, "emma");
        let list = app.screen.list();
        assert_eq!(list.books.len(), 2);
        assert_eq!(list.filtered_books.len(), 1);
        assert_eq!(list.filtered_books[0].book_id, "102");
    }

    #[test]
    fn issuing_to_the_sentinel_name_is_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "101,Dune,Herbert,Available,None\n");
        login(&mut app);

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "None");
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::Lending(_)));
        assert_eq!(status(&app).map(|(_, kind)| kind), Some(StatusKind::Error));
        let book = app.screen.list().current_book().cloned().expect("book");
        assert_eq!(book.status, BookStatus::Available);
    }

    #[test]
    fn cursor_stays_inside_its_area() {
        let inner = Rect::new(5, 2, 10, 3);
        assert_eq!(cursor_in(inner, 4, 1), (9, 3));
        assert_eq!(cursor_in(inner, 40, 9), (14, 4));
        assert_eq!(cursor_in(inner, usize::MAX, 0), (14, 2));

        let edge = Rect::new(u16::MAX - 1, 0, 1, 1);
        assert_eq!(cursor_in(edge, 3, 0), (u16::MAX - 1, 0));
        assert_eq!(cursor_in(Rect::new(3, 3, 0, 0), 2, 2), (3, 3));
    }

    #[test]
    fn q_quits_from_any_screen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_with(dir.path(), "");
        assert!(app.handle_key(KeyCode::Char('q')).expect("key"));

        login(&mut app);
        assert!(app.handle_key(KeyCode::Char('q')).expect("key"));
    }
}
