//! API key service library.
//!
//! Database initialization, the API key endpoints, and the shared
//! configuration, error, and middleware layers.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
