//! # Authentication
//!
//! JWT-based authentication for the API. The `middleware` sub-module defines
//! the `AuthenticatedUser` extractor used by protected handlers.

pub mod middleware;
