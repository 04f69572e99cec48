//! Libris Library Reservation System
//!
//! A Rust server for a small library: readers register, log in, browse the
//! catalog and reserve copies; a librarian account manages book records and
//! reviews reservation history. Accounts and reservations live in a document
//! store, the book catalog in a relational store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
