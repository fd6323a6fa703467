//! Hand-written [`CatalogApi`] doubles.
//!
//! `MockCatalogApi` (generated by mockall on the trait) covers call-count
//! expectations. The doubles here cover the cases mockall is awkward for:
//! canned catalogs, and responses held back until a test releases them.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::core::api::CatalogApi;
use crate::core::error::{CatalogError, Result};
use crate::core::filter;
use crate::core::models::{Book, BookPatch, Insight, NewBook};

fn server_error(message: &str) -> CatalogError {
    CatalogError::Http {
        status: 500,
        message: message.to_string(),
        errors: BTreeMap::new(),
    }
}

fn not_found(id: &str) -> CatalogError {
    CatalogError::Http {
        status: 404,
        message: format!("Book {id} not found"),
        errors: BTreeMap::new(),
    }
}

// ============================================================================
// Canned catalog
// ============================================================================

/// Answers from a fixed catalog and insight table.
#[derive(Clone, Default)]
pub struct StubApi {
    books: Vec<Book>,
    insights: HashMap<String, Insight>,
    list_error: Option<String>,
    insight_error: bool,
    list_calls: Arc<AtomicUsize>,
    insight_calls: Arc<AtomicUsize>,
}

impl StubApi {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            ..Self::default()
        }
    }

    pub fn with_insight(mut self, id: &str, insight: Insight) -> Self {
        self.insights.insert(id.to_string(), insight);
        self
    }

    /// Make `list` fail with a 500 carrying `message`.
    pub fn failing_list(mut self, message: &str) -> Self {
        self.list_error = Some(message.to_string());
        self
    }

    pub fn failing_insights(mut self) -> Self {
        self.insight_error = true;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn insight_calls(&self) -> usize {
        self.insight_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogApi for StubApi {
    async fn list(&self) -> Result<Vec<Book>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match &self.list_error {
            Some(message) => Err(server_error(message)),
            None => Ok(self.books.clone()),
        }
    }

    async fn get(&self, id: &str) -> Result<Book> {
        self.books
            .iter()
            .find(|b| b.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>> {
        Ok(filter::filter_books(&self.books, query)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn create(&self, book: &NewBook) -> Result<Book> {
        Ok(book.clone().with_id(format!("{}", self.books.len() + 1)))
    }

    async fn update(&self, id: &str, patch: &BookPatch) -> Result<Book> {
        let mut book = self.get(id).await?;
        if let Some(title) = &patch.title {
            book.title = title.clone();
        }
        if let Some(author) = &patch.author {
            book.author = author.clone();
        }
        Ok(book)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.get(id).await.map(|_| ())
    }

    async fn fetch_insight(&self, id: &str) -> Result<Option<Insight>> {
        self.insight_calls.fetch_add(1, Ordering::SeqCst);
        if self.insight_error {
            return Err(server_error("insight generation failed"));
        }
        Ok(self.insights.get(id).cloned())
    }
}

// ============================================================================
// Gated responses
// ============================================================================

/// Holds every response until [`GatedApi::release`] is called.
///
/// `list` answers with `books`; `fetch_insight(id)` answers with an insight
/// whose content is `Insight for {id}`.
#[derive(Clone)]
pub struct GatedApi {
    open: Arc<watch::Sender<bool>>,
    books: Vec<Book>,
}

impl GatedApi {
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        let (open, _) = watch::channel(false);
        Self {
            open: Arc::new(open),
            books,
        }
    }

    /// Let all pending and future calls complete.
    pub fn release(&self) {
        self.open.send_replace(true);
    }

    async fn gate(&self) {
        let mut rx = self.open.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }
}

#[async_trait]
impl CatalogApi for GatedApi {
    async fn list(&self) -> Result<Vec<Book>> {
        self.gate().await;
        Ok(self.books.clone())
    }

    async fn get(&self, id: &str) -> Result<Book> {
        self.gate().await;
        self.books
            .iter()
            .find(|b| b.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn search(&self, query: &str) -> Result<Vec<Book>> {
        self.gate().await;
        Ok(filter::filter_books(&self.books, query)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn create(&self, book: &NewBook) -> Result<Book> {
        self.gate().await;
        Ok(book.clone().with_id("new"))
    }

    async fn update(&self, id: &str, _patch: &BookPatch) -> Result<Book> {
        self.get(id).await
    }

    async fn remove(&self, _id: &str) -> Result<()> {
        self.gate().await;
        Ok(())
    }

    async fn fetch_insight(&self, id: &str) -> Result<Option<Insight>> {
        self.gate().await;
        Ok(Some(Insight {
            book_id: id.to_string(),
            content: format!("Insight for {id}"),
        }))
    }
}
