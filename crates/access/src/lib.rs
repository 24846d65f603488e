//! # Access Crate
//!
//! This crate is the central authority for identity and role logic in the
//! `adforge` application. Users arrive via token claims and are mirrored
//! into the local database on first sight.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use turso::{Database, Error as TursoError, Row, params};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Database error: {0}")]
    Database(#[from] TursoError),
    #[error("Failed to create or find user for identifier: {0}")]
    UserPersistenceFailed(String),
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// The two sides of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Brand,
    Influencer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Brand => "brand",
            Role::Influencer => "influencer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "brand" => Ok(Role::Brand),
            "influencer" => Ok(Role::Influencer),
            other => Err(AccessError::UnknownRole(other.to_string())),
        }
    }
}

/// Represents a user in the system.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    /// The unique, deterministic ID of the user (UUIDv5 from an external identifier).
    pub id: String,
    /// Which side of the marketplace the user belongs to.
    pub role: Role,
    /// The timestamp when the user was first created.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Row> for User {
    type Error = AccessError;

    fn try_from(row: &Row) -> std::result::Result<Self, Self::Error> {
        let role_str: String = row.get(1)?;
        let created_at_str: String = row.get(2)?;
        let created_at =
            chrono::NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
                .map_err(|e| {
                    AccessError::DataIntegrity(format!(
                        "Failed to parse date '{created_at_str}': {e}"
                    ))
                })?;

        Ok(User {
            id: row.get(0)?,
            role: Role::from_str(&role_str)?,
            created_at,
        })
    }
}

/// Finds a user by their unique identifier (e.g., a token subject), creating
/// them if they don't exist.
///
/// The primary key is a deterministic UUIDv5 of the identifier, ensuring
/// idempotency. `role` seeds the first insert only; existing users keep the
/// role already stored for them.
pub async fn get_or_create_user(
    db: &Database,
    user_identifier: &str,
    role: Role,
) -> Result<User, AccessError> {
    let conn = db.connect()?;
    let user_id = Uuid::new_v5(&Uuid::NAMESPACE_URL, user_identifier.as_bytes()).to_string();

    // 1. Try to SELECT the user first for maximum compatibility.
    let mut rows = conn
        .query(
            "SELECT id, role, created_at FROM users WHERE id = ?",
            params![user_id.clone()],
        )
        .await?;

    if let Some(row) = rows.next().await? {
        // User exists, parse and return it.
        return User::try_from(&row);
    }

    debug!(%user_id, %role, "Creating user record");
    conn.execute(
        "INSERT INTO users (id, role) VALUES (?, ?)",
        params![user_id.clone(), role.as_str()],
    )
    .await?;

    // 2. SELECT the newly created user to get all fields (like created_at).
    let mut rows = conn
        .query(
            "SELECT id, role, created_at FROM users WHERE id = ?",
            params![user_id],
        )
        .await?;

    let row = rows
        .next()
        .await?
        .ok_or_else(|| AccessError::UserPersistenceFailed(user_identifier.to_string()))?;

    User::try_from(&row)
}
