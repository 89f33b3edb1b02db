//! HTTP JSON API over a SQLite store of trivia questions and categories:
//! paginated listing, creation and deletion, search, per-category listing
//! and random quiz draws.

pub mod archive;
pub mod db;
pub mod pagination;
pub mod server;
pub mod service;
pub mod settings;
pub mod telemetry;
