use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::NO_HOLDER;

/// Render one `Label: value` row of a modal form. Empty values show a
/// placeholder; the focused row is highlighted.
fn field_line(label: &str, value: &str, placeholder: &str, active: bool) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

/// Trimmed value of a required field, or a message naming it.
fn required(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(anyhow!("{message}"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Username/password prompt shown before the dashboard opens.
#[derive(Default, Clone)]
pub(crate) struct LoginForm {
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) active: LoginField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoginField::Username => self.username.push(ch),
            LoginField::Password => self.password.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Start over on the password after a failed attempt.
    pub(crate) fn reject(&mut self, message: &str) {
        self.password.clear();
        self.active = LoginField::Password;
        self.error = Some(message.to_string());
    }

    /// Password is masked so it never reaches the screen.
    pub(crate) fn build_line(&self, field: LoginField) -> Line<'static> {
        match field {
            LoginField::Username => field_line(
                "Username",
                &self.username,
                "<required>",
                self.active == LoginField::Username,
            ),
            LoginField::Password => field_line(
                "Password",
                &"*".repeat(self.password.chars().count()),
                "<required>",
                self.active == LoginField::Password,
            ),
        }
    }

    pub(crate) fn value_len(&self, field: LoginField) -> usize {
        match field {
            LoginField::Username => self.username.chars().count(),
            LoginField::Password => self.password.chars().count(),
        }
    }
}

/// Fields of the add-book form.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) book_id: String,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    BookId,
    Title,
    Author,
}

impl BookForm {
    /// Cycle focus forward across the three fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            BookField::BookId => BookField::Title,
            BookField::Title => BookField::Author,
            BookField::Author => BookField::BookId,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            BookField::BookId => BookField::Author,
            BookField::Title => BookField::BookId,
            BookField::Author => BookField::Title,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::BookId => &mut self.book_id,
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
        }
    }

    fn value(&self, field: BookField) -> &str {
        match field {
            BookField::BookId => &self.book_id,
            BookField::Title => &self.title,
            BookField::Author => &self.author,
        }
    }

    /// Validate the inputs and return `(id, title, author)`, all trimmed.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, String)> {
        Ok((
            required(&self.book_id, "Book ID is required.")?,
            required(&self.title, "Title is required.")?,
            required(&self.author, "Author is required.")?,
        ))
    }

    pub(crate) fn build_line(&self, label: &str, field: BookField) -> Line<'static> {
        field_line(label, self.value(field), "<required>", self.active == field)
    }

    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }
}

/// Issue and return forms. Returns only need the book ID, so the holder row
/// is hidden for them.
#[derive(Clone)]
pub(crate) struct LoanForm {
    pub(crate) kind: LoanKind,
    pub(crate) book_id: String,
    pub(crate) student: String,
    pub(crate) active: LoanField,
    pub(crate) error: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum LoanKind {
    Issue,
    Return,
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum LoanField {
    BookId,
    Student,
}

impl LoanForm {
    /// Open the form with the selected book's ID already filled in. When an ID
    /// is known, issuing starts on the student field.
    pub(crate) fn new(kind: LoanKind, book_id: Option<&str>) -> Self {
        let book_id = book_id.unwrap_or_default().to_string();
        let active = if kind == LoanKind::Issue && !book_id.is_empty() {
            LoanField::Student
        } else {
            LoanField::BookId
        };
        Self {
            kind,
            book_id,
            student: String::new(),
            active,
            error: None,
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self.kind {
            LoanKind::Issue => "Issue Book",
            LoanKind::Return => "Return Book",
        }
    }

    pub(crate) fn toggle_field(&mut self) {
        if self.kind == LoanKind::Return {
            return;
        }
        self.active = match self.active {
            LoanField::BookId => LoanField::Student,
            LoanField::Student => LoanField::BookId,
        };
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            LoanField::BookId => self.book_id.push(ch),
            LoanField::Student => self.student.push(ch),
        }
        true
    }

    pub(crate) fn backspace(&mut self) {
        match self.active {
            LoanField::BookId => {
                self.book_id.pop();
            }
            LoanField::Student => {
                self.student.pop();
            }
        }
    }

    /// Validated book ID for a return.
    pub(crate) fn parse_book_id(&self) -> Result<String> {
        required(&self.book_id, "Book ID is required.")
    }

    /// Validated `(book id, student)` for an issue. The empty-holder sentinel
    /// is refused, since it would load back as a book with no holder.
    pub(crate) fn parse_issue(&self) -> Result<(String, String)> {
        let book_id = self.parse_book_id()?;
        let student = required(&self.student, "Student name is required.")?;
        if student == NO_HOLDER {
            return Err(anyhow!("\"{NO_HOLDER}\" cannot be used as a student name."));
        }
        Ok((book_id, student))
    }

    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![field_line(
            "Book ID",
            &self.book_id,
            "<required>",
            self.active == LoanField::BookId,
        )];
        if self.kind == LoanKind::Issue {
            lines.push(field_line(
                "Student",
                &self.student,
                "<required>",
                self.active == LoanField::Student,
            ));
        }
        lines
    }

    /// Label width and row of the focused field, for cursor placement.
    pub(crate) fn cursor(&self) -> (usize, u16) {
        match self.active {
            LoanField::BookId => ("Book ID: ".len() + self.book_id.chars().count(), 0),
            LoanField::Student => ("Student: ".len() + self.student.chars().count(), 1),
        }
    }
}
