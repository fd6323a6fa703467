//! Catalog service HTTP client.
//!
//! [`CatalogApi`] is the seam views talk to; [`HttpCatalogClient`] is the
//! reqwest-backed implementation. Every method issues exactly one request,
//! never retries and never times out on its own.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ApiConfig;

use super::error::{CatalogError, Result};
use super::models::{Book, BookPatch, Insight, NewBook};

// ============================================================================
// Client contract
// ============================================================================

/// Logical operations against the catalog backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All entries.
    async fn list(&self) -> Result<Vec<Book>>;

    /// One entry by id. Unknown-id behavior is the backend's.
    async fn get(&self, id: &str) -> Result<Book>;

    /// Entries whose title or author match. A blank query lists everything.
    async fn search(&self, query: &str) -> Result<Vec<Book>>;

    /// Create an entry; the returned entry carries the server-assigned id.
    async fn create(&self, book: &NewBook) -> Result<Book>;

    /// Apply a partial update.
    async fn update(&self, id: &str, patch: &BookPatch) -> Result<Book>;

    /// Delete an entry.
    async fn remove(&self, id: &str) -> Result<()>;

    /// AI insight for an entry. `None` when the backend has nothing to say
    /// (empty or `null` body).
    async fn fetch_insight(&self, id: &str) -> Result<Option<Insight>>;
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// reqwest-backed [`CatalogApi`].
#[derive(Clone)]
pub struct HttpCatalogClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpCatalogClient {
    /// Build a client from configuration.
    ///
    /// JSON `Content-Type`/`Accept` headers are sent on every request, merged
    /// with any extra headers from `config.headers` (which win on conflict).
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CatalogError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CatalogError::Config(format!("invalid header name '{name}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| CatalogError::Config(format!("invalid value for '{name}': {e}")))?;
            headers.insert(name, value);
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Convenience constructor with default headers.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn book_path(id: &str) -> String {
        format!("/books/{}", urlencoding::encode(id))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client.request(method, self.url(path))
    }

    /// Send the request and return the body of a 2xx response.
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await.map_err(CatalogError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(CatalogError::Network)?;

        if !status.is_success() {
            let err = CatalogError::from_response(status.as_u16(), &body);
            log::warn!("Catalog request failed ({}): {err}", status.as_u16());
            return Err(err);
        }

        Ok(body.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Book>> {
        self.send_json(self.request(Method::GET, "/books")).await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Book> {
        self.send_json(self.request(Method::GET, &Self::book_path(id)))
            .await
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Book>> {
        if query.trim().is_empty() {
            return self.list().await;
        }

        let request = self
            .request(Method::GET, "/books/search")
            .query(&[("title", query), ("author", query)]);
        self.send_json(request).await
    }

    #[instrument(skip(self, book), fields(title = %book.title))]
    async fn create(&self, book: &NewBook) -> Result<Book> {
        let created: Book = self
            .send_json(self.request(Method::POST, "/books").json(book))
            .await?;
        log::info!("Created book {:?}", created.id);
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: &BookPatch) -> Result<Book> {
        self.send_json(self.request(Method::PUT, &Self::book_path(id)).json(patch))
            .await
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, &Self::book_path(id)))
            .await?;
        log::info!("Deleted book {id}");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_insight(&self, id: &str) -> Result<Option<Insight>> {
        let path = format!("{}/ai-insights", Self::book_path(id));
        let body = self.send(self.request(Method::GET, &path)).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(serde_json::from_slice::<Option<Insight>>(&body)?)
    }
}
