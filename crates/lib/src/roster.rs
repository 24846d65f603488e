//! # Influencer Roster
//!
//! The roster is the list of candidate influencers injected into every
//! campaign prompt. Implementations live in plugin crates; the pipeline only
//! depends on the `RosterProvider` trait.

use async_trait::async_trait;
use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Debug;
use thiserror::Error;

/// Sentinel injected into the prompt when no roster data is available.
pub const NO_INFLUENCER_DATA: &str = "No influencer data found";

/// One influencer as read from the roster source.
///
/// All fields are kept as text so the prompt echoes them byte for byte.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InfluencerRecord {
    pub name: String,
    pub username: String,
    pub platform: String,
    pub location: String,
    pub followers: String,
    pub engagement_rate: String,
}

/// Errors that can occur while fetching the influencer roster.
#[derive(Error, Debug, Clone)]
pub enum RosterError {
    /// The configured roster source URL is not usable.
    #[error("Invalid roster source URL: {0}")]
    InvalidUrl(String),

    /// The roster source could not be downloaded.
    #[error("Failed to fetch roster: {0}")]
    Fetch(String),

    /// The downloaded roster data could not be parsed.
    #[error("Failed to parse roster data: {0}")]
    Parse(String),
}

/// A trait for influencer roster sources.
#[async_trait]
pub trait RosterProvider: Send + Sync + Debug + DynClone {
    /// Fetches the current roster. Called once per generation request; the
    /// result is never cached, so roster edits show up on the next request.
    async fn fetch(&self) -> Result<Vec<InfluencerRecord>, RosterError>;
}

dyn_clone::clone_trait_object!(RosterProvider);

/// Renders the roster into the prompt's candidate section, one JSON object
/// per line with a `recommendedCollab` instruction appended.
///
/// An empty roster renders the [`NO_INFLUENCER_DATA`] sentinel instead.
pub fn echo_block(roster: &[InfluencerRecord]) -> String {
    if roster.is_empty() {
        return NO_INFLUENCER_DATA.to_string();
    }

    roster
        .iter()
        .map(|record| {
            json!({
                "name": record.name,
                "username": record.username,
                "platform": record.platform,
                "location": record.location,
                "followers": record.followers,
                "engagementRate": record.engagement_rate,
                "recommendedCollab": "<write one sentence recommending how the brand should collaborate with this influencer>",
            })
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
