//! # Authentication Middleware
//!
//! This module provides the Axum middleware for handling JWT-based authentication.
//! It defines an `AuthenticatedUser` extractor that can be used in handlers to
//! ensure a valid user is present and to get their identity.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use adforge_access::{get_or_create_user, Role, User};
use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, warn};

use crate::state::AppState;

/// Represents the claims we expect to find in the JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The subject of the token, which we use as the unique user identifier.
    pub sub: String,
    /// The expiration timestamp.
    pub exp: usize,
    /// The marketplace role carried by the token ("brand" or "influencer").
    pub role: String,
    /// The user's database ID (UUID). This is optional and mainly for testing.
    #[serde(default)]
    pub user_id: String,
}

/// An Axum extractor that provides the currently authenticated user.
///
/// Every protected route requires a valid bearer token:
/// 1. **No Token Present**: Rejects the request with a `401 Unauthorized`.
/// 2. **Valid Token Present**: Resolves to the authenticated user.
/// 3. **Invalid/Expired Token Present**: Rejects the request with a `401 Unauthorized`.
///
/// The role stored on the user record wins over the role claimed by the
/// token; the claim only seeds the record on first contact.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// A custom rejection type for authentication failures.
///
/// This allows the `FromRequestParts` implementation to return a specific
/// HTTP status code and error message, which Axum then turns into a response.
pub struct AuthError(StatusCode, String);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract the token from the `Authorization: Bearer <token>` header.
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    warn!("Missing or malformed Authorization header: {}", e);
                    AuthError(
                        StatusCode::UNAUTHORIZED,
                        "Authentication required.".to_string(),
                    )
                })?;

        let jwt_secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "a-secure-secret-key".to_string());

        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_secret(jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|e| {
            warn!("JWT validation failed: {}", e);
            AuthError(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token.".to_string(),
            )
        })?;

        // Manually verify the expiration to be absolutely sure.
        // The `jsonwebtoken` crate should handle this, but adding an explicit
        // check makes the logic more robust against subtle configuration issues.
        let current_timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| {
                AuthError(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "System time is before UNIX EPOCH.".to_string(),
                )
            })?
            .as_secs();

        if token_data.claims.exp < current_timestamp as usize {
            warn!(
                "Token has expired. exp: {}, current: {}",
                token_data.claims.exp, current_timestamp
            );
            return Err(AuthError(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token.".to_string(),
            ));
        }

        let role: Role = token_data.claims.role.parse().map_err(|_| {
            warn!("Token carried unknown role: {}", token_data.claims.role);
            AuthError(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token.".to_string(),
            )
        })?;

        // If user_id is provided in the claim, construct the user directly.
        // This is primarily for testing scenarios to inject a specific user.
        let user = if !token_data.claims.user_id.is_empty() {
            User {
                id: token_data.claims.user_id,
                role,
                created_at: Utc::now(),
            }
        } else {
            get_or_create_user(&state.sqlite_provider.db, &token_data.claims.sub, role)
                .await
                .map_err(|e| {
                    // This is an internal error because the DB should be available.
                    error!("Failed to get or create user: {}", e);
                    AuthError(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Could not retrieve user: {e}"),
                    )
                })?
        };

        Ok(AuthenticatedUser(user))
    }
}
