//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `adforge-server`.
//! The handlers are split into logical sub-modules based on their functionality.

// Sub-modules for different handler categories.
pub mod campaign;
pub mod general;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use campaign::*;
pub use general::*;
