//! # General Route Handlers
//!
//! This module contains the general-purpose Axum handlers for the
//! `adforge-server`, namely the root and health check endpoints.

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "adforge server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
