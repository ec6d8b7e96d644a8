//! Terminal analyzer for exported Spotify streaming history.
//!
//! `library` loads the export, `stats` aggregates it, `components` turn it
//! into reports and `app`/`ui`/`runtime` drive the terminal front end.

pub mod app;
pub mod components;
pub mod config;
pub mod filters;
pub mod library;
pub mod logging;
pub mod runtime;
pub mod stats;
pub mod ui;
