//! Test Fixtures
//!
//! Catalog entries and insights with predictable contents.

use crate::core::models::{Book, Insight};

/// An entry with an id, title and author. Other fields get filler values.
pub fn book(id: &str, title: &str, author: &str) -> Book {
    Book {
        id: Some(id.to_string()),
        title: title.to_string(),
        author: author.to_string(),
        isbn: format!("978-{id}"),
        publication_year: 1965,
        description: format!("About {title}."),
    }
}

/// An entry the backend has not assigned an id to.
pub fn unsaved_book(title: &str, author: &str) -> Book {
    Book {
        id: None,
        ..book("", title, author)
    }
}

pub fn dune() -> Book {
    book("1", "Dune", "Frank Herbert")
}

pub fn foundation() -> Book {
    book("2", "Foundation", "Isaac Asimov")
}

pub fn insight(book_id: &str, content: &str) -> Insight {
    Insight {
        book_id: book_id.to_string(),
        content: content.to_string(),
    }
}
