//! Client-side catalog filtering.
//!
//! Filtering works on the already-fetched catalog only and never touches the
//! network. An entry matches when the filter text, lower-cased, is a substring
//! of its lower-cased title or author. A blank filter matches everything.

use super::models::Book;

/// Whether `query` narrows the catalog at all.
pub fn is_active(query: &str) -> bool {
    !query.trim().is_empty()
}

/// Whether one entry passes the filter.
pub fn matches(book: &Book, query: &str) -> bool {
    if !is_active(query) {
        return true;
    }
    let needle = query.to_lowercase();
    book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
}

/// Indices into `books` of the entries that pass the filter, in catalog order.
pub fn filter_indices(books: &[Book], query: &str) -> Vec<usize> {
    books
        .iter()
        .enumerate()
        .filter(|(_, book)| matches(book, query))
        .map(|(i, _)| i)
        .collect()
}

/// The entries that pass the filter, in catalog order.
pub fn filter_books<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    books.iter().filter(|book| matches(book, query)).collect()
}

/// Summary line shown above the grid.
///
/// `Showing 1 book`, `Showing 3 books`, and when filtering,
/// `Showing 1 book (filtered from 2 total)`.
pub fn count_line(shown: usize, total: usize, filtering: bool) -> String {
    let noun = if shown == 1 { "book" } else { "books" };
    if filtering {
        format!("Showing {shown} {noun} (filtered from {total} total)")
    } else {
        format!("Showing {shown} {noun}")
    }
}
