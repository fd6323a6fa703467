//! Error type for catalog API calls.
//!
//! Transport, HTTP and decode failures all collapse into [`CatalogError`],
//! whose `Display` is the single message shown to users. Structured
//! validation detail rides along for callers that want it.

use std::collections::BTreeMap;

use miette::Diagnostic;
use thiserror::Error;

use super::models::ApiErrorBody;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors surfaced by the catalog client.
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    /// No response was obtained (connection refused, DNS, reset...).
    #[error("Network error: {0}")]
    #[diagnostic(
        code("CATALOG::NETWORK"),
        help("Check that the catalog service is running and the base URL is correct")
    )]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    #[diagnostic(code("CATALOG::HTTP"))]
    Http {
        status: u16,
        message: String,
        /// Validation errors keyed by field, when the backend sent them.
        errors: BTreeMap<String, Vec<String>>,
    },

    /// The body could not be decoded into the expected shape.
    #[error("Failed to decode response: {0}")]
    #[diagnostic(code("CATALOG::DECODE"))]
    Decode(String),

    /// The client could not be built from its configuration.
    #[error("Configuration error: {0}")]
    #[diagnostic(code("CATALOG::CONFIG"))]
    Config(String),
}

impl CatalogError {
    /// Build an HTTP error from a status code and the raw response body.
    ///
    /// Uses the backend's `message` when the body parses and carries one,
    /// otherwise a generic message naming the status.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ApiErrorBody>(body).ok();
        let errors = parsed
            .as_ref()
            .and_then(|b| b.errors.clone())
            .unwrap_or_default();
        let message = parsed
            .map(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));

        Self::Http {
            status,
            message,
            errors,
        }
    }

    /// HTTP status code, for HTTP failures.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field-keyed validation errors, if the backend sent any.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Self::Http { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    /// Whether no response was obtained at all.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
