//! Eqborrow Equipment Borrow/Return Tracking System
//!
//! A REST JSON API server tracking institutional equipment: employees
//! request to borrow equipment, administrators approve, reject and track
//! returns, and the server maintains stock quantities and an append-only
//! activity log. Every lifecycle transition runs in a single database
//! transaction with row-level locks on the touched inventory items.

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
