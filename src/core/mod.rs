pub mod api;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod models;
