//! Free-text filtering of the book table.

use crate::models::Book;

/// Substring match of the lowercased query against a book's title, author and
/// ID. Title and author are lowercased too; the ID is compared as stored.
pub fn matches(book: &Book, query: &str) -> bool {
    let needle = query.to_lowercase();
    book.title.to_lowercase().contains(&needle)
        || book.author.to_lowercase().contains(&needle)
        || book.book_id.contains(&needle)
}

/// Every book matching `query`, in table order. An empty query matches all.
pub fn search(books: &[Book], query: &str) -> Vec<Book> {
    books
        .iter()
        .filter(|book| matches(book, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf() -> Vec<Book> {
        vec![
            Book::new("101", "Dune", "Frank Herbert"),
            Book::new("102", "Emma", "Jane Austen"),
            Book::new("A-7", "Persuasion", "Jane Austen"),
        ]
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let books = shelf();
        assert_eq!(search(&books, ""), books);
    }

    #[test]
    fn title_match_ignores_case() {
        let results = search(&shelf(), "DUNE");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].book_id, "101");
    }

    #[test]
    fn author_match_keeps_table_order() {
        let ids: Vec<_> = search(&shelf(), "austen")
            .into_iter()
            .map(|book| book.book_id)
            .collect();
        assert_eq!(ids, ["102", "A-7"]);
    }

    #[test]
    fn id_is_matched_as_text() {
        let ids: Vec<_> = search(&shelf(), "10")
            .into_iter()
            .map(|book| book.book_id)
            .collect();
        assert_eq!(ids, ["101", "102"]);
    }

    #[test]
    fn id_is_not_lowercased() {
        assert!(search(&shelf(), "A-7").is_empty());
    }

    #[test]
    fn no_tokenization_of_the_query() {
        assert!(search(&shelf(), "jane emma").is_empty());
    }
}
