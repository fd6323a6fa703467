/// Library Catalog - terminal browser for a REST book catalog.
///
/// Lists, filters and inspects catalog entries, and shows AI-generated
/// insights per entry, all fetched from a separate catalog service.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
