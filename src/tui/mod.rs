//! Terminal front end: an Elm-style loop over pages and their views.

pub mod app;
pub mod events;
pub mod layout;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
