use crate::errors::PlanError;
use crate::types::Campaign;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for campaign persistence backends.
///
/// This trait defines a common interface for storing and reading generated
/// campaign plans, independent of the database in use.
#[async_trait]
pub trait CampaignStore: Send + Sync + DynClone + Debug {
    /// Returns the name of the storage provider (e.g., "SQLite").
    fn name(&self) -> &str;

    /// Persists a newly generated campaign.
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), PlanError>;

    /// Fetches a single campaign by ID.
    async fn get_campaign(&self, id: &str) -> Result<Option<Campaign>, PlanError>;

    /// Lists all campaigns belonging to a brand, newest first.
    async fn list_campaigns_for_brand(&self, brand_id: &str) -> Result<Vec<Campaign>, PlanError>;
}

dyn_clone::clone_trait_object!(CampaignStore);
