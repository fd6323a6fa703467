//! Property-based tests for catalog filtering

use proptest::prelude::*;

use crate::core::filter::{count_line, filter_books, filter_indices, is_active, matches};
use crate::core::models::Book;

// ============================================================================
// Strategies
// ============================================================================

fn arb_book() -> impl Strategy<Value = Book> {
    (
        "[0-9]{1,4}",
        "[A-Za-z ]{0,20}",
        "[A-Za-z .]{0,20}",
        1800i32..2030,
    )
        .prop_map(|(id, title, author, year)| Book {
            id: Some(id),
            title,
            author,
            isbn: String::new(),
            publication_year: year,
            description: String::new(),
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Book>> {
    prop::collection::vec(arb_book(), 0..20)
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t]{0,5}"
}

fn arb_query() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,4}"
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn blank_filter_is_identity(books in arb_catalog(), query in arb_blank()) {
        let shown = filter_books(&books, &query);
        prop_assert_eq!(shown.len(), books.len());
        prop_assert!(!is_active(&query));
    }

    #[test]
    fn result_is_ordered_subset(books in arb_catalog(), query in arb_query()) {
        let indices = filter_indices(&books, &query);
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        for i in &indices {
            prop_assert!(matches(&books[*i], &query));
        }
        let excluded = books.len() - indices.len();
        let failing = books.iter().filter(|b| !matches(b, &query)).count();
        prop_assert_eq!(excluded, failing);
    }

    #[test]
    fn filtering_is_idempotent(books in arb_catalog(), query in arb_query()) {
        let once: Vec<Book> = filter_books(&books, &query).into_iter().cloned().collect();
        let twice: Vec<Book> = filter_books(&once, &query).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn match_is_case_insensitive(books in arb_catalog(), query in arb_query()) {
        let lower = filter_indices(&books, &query.to_lowercase());
        let upper = filter_indices(&books, &query.to_uppercase());
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn count_line_reports_sizes(books in arb_catalog(), query in arb_query()) {
        let shown = filter_books(&books, &query).len();
        let line = count_line(shown, books.len(), is_active(&query));
        let expected_prefix = format!("Showing {shown} ");
        prop_assert!(line.starts_with(&expected_prefix));
        let filtered_suffix = format!(" (filtered from {} total)", books.len());
        prop_assert_eq!(line.ends_with(&filtered_suffix), is_active(&query));
    }
}
