use crate::{errors::PlanError, providers::db::storage::CampaignStore, types::Campaign};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::{self, Debug};
use tracing::debug;
use turso::{params, Database, Row};

pub mod sql;

/// A provider for interacting with a local SQLite database using Turso.
///
/// This provider holds a `Database` instance, which manages a connection
/// pool. When cloned, it shares the same underlying database, allowing
/// concurrent access to the same database file or in-memory instance.
#[derive(Clone)]
pub struct SqliteProvider {
    /// The Turso database instance. It's cloneable and thread-safe.
    pub db: Database,
}

impl SqliteProvider {
    /// Creates a new `SqliteProvider` from a file path or in-memory.
    ///
    /// # Arguments
    ///
    /// * `db_path`: The path to the SQLite database file. Use ":memory:" for
    ///   a unique, isolated in-memory database. To share an in-memory
    ///   database across multiple `SqliteProvider` instances (e.g., in
    ///   tests), create one provider and then `.clone()` it.
    pub async fn new(db_path: &str) -> Result<Self, PlanError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| PlanError::StorageConnection(e.to_string()))?;

        // Enable WAL mode for better concurrency on file-based databases.
        // It has no effect on in-memory databases but is safe to run.
        let conn = db
            .connect()
            .map_err(|e| PlanError::StorageConnection(e.to_string()))?;
        // Use `query` for PRAGMA statements that return a value to avoid
        // "unexpected row" errors.
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| PlanError::StorageConnection(e.to_string()))?;

        Ok(Self { db })
    }

    /// Ensures that all required application tables and indexes exist.
    /// This function is idempotent and safe to call on every startup.
    pub async fn initialize_schema(&self) -> Result<(), PlanError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| PlanError::StorageConnection(e.to_string()))?;

        for statement in sql::ALL_TABLE_CREATION_SQL {
            conn.execute(statement, ())
                .await
                .map_err(|e| PlanError::StorageOperationFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Debug for SqliteProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteProvider").finish_non_exhaustive()
    }
}

impl AsRef<Database> for SqliteProvider {
    fn as_ref(&self) -> &Database {
        &self.db
    }
}

fn row_to_campaign(row: &Row) -> Result<Campaign, PlanError> {
    let calendar_events: String = row.get(11)?;
    let bingo_suggestions: String = row.get(12)?;
    let more_advice: String = row.get(13)?;
    let created_at: String = row.get(15)?;

    Ok(Campaign {
        id: row.get(0)?,
        brand_id: row.get(1)?,
        name: row.get(2)?,
        campaign_type: row.get(3)?,
        status: row.get(4)?,
        objective: row.get(5)?,
        target_audience: row.get(6)?,
        duration: row.get(7)?,
        budget: row.get(8)?,
        influencer_collaboration: row.get(9)?,
        about_campaign: row.get(10)?,
        calendar_events: serde_json::from_str(&calendar_events)?,
        bingo_suggestions: serde_json::from_str(&bingo_suggestions)?,
        more_advice: serde_json::from_str(&more_advice)?,
        ai_response: row.get(14)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| {
                PlanError::StorageOperationFailed(format!(
                    "Failed to parse date '{created_at}': {e}"
                ))
            })?
            .with_timezone(&Utc),
    })
}

#[async_trait]
impl CampaignStore for SqliteProvider {
    fn name(&self) -> &str {
        "SQLite"
    }

    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), PlanError> {
        debug!(campaign_id = %campaign.id, "--> Inserting campaign");

        let conn = self
            .db
            .connect()
            .map_err(|e| PlanError::StorageConnection(e.to_string()))?;

        conn.execute(
            sql::INSERT_CAMPAIGN,
            params![
                campaign.id.clone(),
                campaign.brand_id.clone(),
                campaign.name.clone(),
                campaign.campaign_type.clone(),
                campaign.status.clone(),
                campaign.objective.clone(),
                campaign.target_audience.clone(),
                campaign.duration.clone(),
                campaign.budget.clone(),
                campaign.influencer_collaboration.clone(),
                campaign.about_campaign.clone(),
                serde_json::to_string(&campaign.calendar_events)?,
                serde_json::to_string(&campaign.bingo_suggestions)?,
                serde_json::to_string(&campaign.more_advice)?,
                campaign.ai_response.clone(),
                campaign.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| PlanError::StorageOperationFailed(e.to_string()))?;

        Ok(())
    }

    async fn get_campaign(&self, id: &str) -> Result<Option<Campaign>, PlanError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| PlanError::StorageConnection(e.to_string()))?;

        let query = format!(
            "SELECT {} FROM campaigns WHERE id = ?",
            sql::SELECT_CAMPAIGN_COLUMNS
        );
        let mut rows = conn
            .query(&query, params![id.to_string()])
            .await
            .map_err(|e| PlanError::StorageOperationFailed(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| PlanError::StorageOperationFailed(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_campaign(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_campaigns_for_brand(&self, brand_id: &str) -> Result<Vec<Campaign>, PlanError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| PlanError::StorageConnection(e.to_string()))?;

        let query = format!(
            "SELECT {} FROM campaigns WHERE brand_id = ? ORDER BY created_at DESC",
            sql::SELECT_CAMPAIGN_COLUMNS
        );
        let mut rows = conn
            .query(&query, params![brand_id.to_string()])
            .await
            .map_err(|e| PlanError::StorageOperationFailed(e.to_string()))?;

        let mut campaigns = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| PlanError::StorageOperationFailed(e.to_string()))?
        {
            campaigns.push(row_to_campaign(&row)?);
        }

        Ok(campaigns)
    }
}
