use crate::models::Book;
use crate::search;

/// Book list shared by the catalog and the dashboard, with an optional
/// search filter and a selection that always stays inside the filtered rows.
pub(crate) struct BookListScreen {
    pub(crate) books: Vec<Book>,
    pub(crate) filtered_books: Vec<Book>,
    pub(crate) filter: Option<String>,
    pub(crate) selected: usize,
}

impl BookListScreen {
    pub(crate) fn new(books: Vec<Book>) -> Self {
        let mut screen = Self {
            filtered_books: Vec::new(),
            books,
            filter: None,
            selected: 0,
        };
        screen.apply_filter();
        screen
    }

    fn apply_filter(&mut self) {
        self.filtered_books = match &self.filter {
            Some(query) => search::search(&self.books, query),
            None => self.books.clone(),
        };
        self.ensure_in_bounds();
    }

    pub(crate) fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
        self.apply_filter();
    }

    pub(crate) fn has_filter(&self) -> bool {
        self.filter
            .as_ref()
            .map(|query| !query.is_empty())
            .unwrap_or(false)
    }

    /// Swap in a freshly loaded table, keeping the current filter.
    pub(crate) fn set_books(&mut self, books: Vec<Book>) {
        self.books = books;
        self.apply_filter();
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.filtered_books.get(self.selected)
    }

    /// Move the selection onto the first visible row with `book_id`.
    pub(crate) fn select_book(&mut self, book_id: &str) {
        if let Some(index) = self
            .filtered_books
            .iter()
            .position(|book| book.book_id == book_id)
        {
            self.selected = index;
        }
    }

    pub(crate) fn issued_count(&self) -> usize {
        self.books.iter().filter(|book| !book.is_available()).count()
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.filtered_books.is_empty() {
            return;
        }
        let len = self.filtered_books.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        if !self.filtered_books.is_empty() {
            self.selected = self.filtered_books.len() - 1;
        }
    }

    fn ensure_in_bounds(&mut self) {
        if self.filtered_books.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.filtered_books.len() {
            self.selected = self.filtered_books.len() - 1;
        }
    }
}
