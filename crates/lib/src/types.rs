use crate::errors::PlanError;
use crate::providers::ai::{ChatProvider, ImageProvider};
use crate::roster::RosterProvider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text fields shared by every campaign request variant.
///
/// All fields arrive from a web form and may be blank.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignBrief {
    pub describe_business: String,
    pub industry: String,
    pub timeframe_start: String,
    pub timeframe_end: String,
    pub platforms: String,
}

/// A campaign generation request, tagged by campaign type.
///
/// The tag selects which prompt template is rendered. An unrecognized or
/// missing tag falls through to the `Custom` variant, which renders the
/// generic template.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "campaignType", rename_all = "camelCase")]
pub enum CampaignRequest {
    #[serde(rename_all = "camelCase")]
    Amplify {
        #[serde(flatten)]
        brief: CampaignBrief,
        #[serde(default)]
        market_trends: String,
        #[serde(default)]
        target_audience: String,
        #[serde(default, rename = "brandUSP")]
        brand_usp: String,
    },
    #[serde(rename_all = "camelCase")]
    MarketProduct {
        #[serde(flatten)]
        brief: CampaignBrief,
        #[serde(default)]
        product_name: String,
        #[serde(default)]
        product_details: String,
        #[serde(default, rename = "productUSP")]
        product_usp: String,
    },
    #[serde(rename_all = "camelCase")]
    DriveSales {
        #[serde(flatten)]
        brief: CampaignBrief,
        #[serde(default)]
        promotional_offers: String,
        #[serde(default)]
        sales_target: String,
    },
    #[serde(rename_all = "camelCase")]
    FindNewCustomers {
        #[serde(flatten)]
        brief: CampaignBrief,
        #[serde(default)]
        current_audience: String,
        #[serde(default)]
        desired_audience: String,
    },
    #[serde(rename_all = "camelCase")]
    DriveEventAwareness {
        #[serde(flatten)]
        brief: CampaignBrief,
        #[serde(default)]
        event_name: String,
        #[serde(default)]
        event_details: String,
        #[serde(default)]
        event_date: String,
    },
    #[serde(untagged, rename_all = "camelCase")]
    Custom {
        #[serde(flatten)]
        brief: CampaignBrief,
        #[serde(default)]
        campaign_goal: String,
    },
}

impl CampaignRequest {
    /// The wire tag for this variant, e.g. `driveEventAwareness`.
    pub fn kind_tag(&self) -> &'static str {
        match self {
            CampaignRequest::Amplify { .. } => "amplify",
            CampaignRequest::MarketProduct { .. } => "marketProduct",
            CampaignRequest::DriveSales { .. } => "driveSales",
            CampaignRequest::FindNewCustomers { .. } => "findNewCustomers",
            CampaignRequest::DriveEventAwareness { .. } => "driveEventAwareness",
            CampaignRequest::Custom { .. } => "custom",
        }
    }

    /// The shared brief fields, regardless of variant.
    pub fn brief(&self) -> &CampaignBrief {
        match self {
            CampaignRequest::Amplify { brief, .. }
            | CampaignRequest::MarketProduct { brief, .. }
            | CampaignRequest::DriveSales { brief, .. }
            | CampaignRequest::FindNewCustomers { brief, .. }
            | CampaignRequest::DriveEventAwareness { brief, .. }
            | CampaignRequest::Custom { brief, .. } => brief,
        }
    }
}

/// One entry of the plan's content calendar, in model-returned order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub date: String,
    pub event: String,
    pub platforms: Vec<String>,
    pub cta: String,
    pub captions: String,
}

/// One content suggestion, enriched with a generated image URL.
///
/// `image_url` is empty when image generation failed for this entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BingoSuggestion {
    pub suggestion: String,
    pub strategy: String,
    pub image_url: String,
}

/// One influencer recommendation from the plan's `moreAdvice` list.
///
/// Identity fields mirror the roster record echoed through the model;
/// `recommended_collab` is the model-written sentence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AdviceEntry {
    pub name: String,
    pub username: String,
    pub platform: String,
    pub location: String,
    pub followers: String,
    pub engagement_rate: String,
    pub recommended_collab: String,
}

/// A fully reconciled campaign plan, as persisted and returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub brand_id: String,
    pub name: String,
    pub campaign_type: String,
    pub status: String,
    pub objective: String,
    pub target_audience: String,
    pub duration: String,
    pub budget: String,
    pub influencer_collaboration: String,
    pub about_campaign: String,
    pub calendar_events: Vec<CalendarEvent>,
    pub bingo_suggestions: Vec<BingoSuggestion>,
    pub more_advice: Vec<AdviceEntry>,
    /// Raw completion text, kept for debugging and audits.
    pub ai_response: String,
    pub created_at: DateTime<Utc>,
}

/// A client that runs the campaign generation pipeline end to end.
#[derive(Debug, Clone)]
pub struct PlanClient {
    pub(crate) chat_provider: Box<dyn ChatProvider>,
    pub(crate) image_provider: Box<dyn ImageProvider>,
    pub(crate) roster_provider: Box<dyn RosterProvider>,
}

/// A builder for creating `PlanClient` instances.
#[derive(Default)]
pub struct PlanClientBuilder {
    chat_provider: Option<Box<dyn ChatProvider>>,
    image_provider: Option<Box<dyn ImageProvider>>,
    roster_provider: Option<Box<dyn RosterProvider>>,
}

impl PlanClientBuilder {
    /// Creates a new `PlanClientBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chat-completion provider.
    pub fn chat_provider(mut self, provider: Box<dyn ChatProvider>) -> Self {
        self.chat_provider = Some(provider);
        self
    }

    /// Sets the image-generation provider.
    pub fn image_provider(mut self, provider: Box<dyn ImageProvider>) -> Self {
        self.image_provider = Some(provider);
        self
    }

    /// Sets the influencer roster provider.
    pub fn roster_provider(mut self, provider: Box<dyn RosterProvider>) -> Self {
        self.roster_provider = Some(provider);
        self
    }

    /// Builds the `PlanClient`, failing if any provider is missing.
    pub fn build(self) -> Result<PlanClient, PlanError> {
        Ok(PlanClient {
            chat_provider: self.chat_provider.ok_or(PlanError::MissingChatProvider)?,
            image_provider: self.image_provider.ok_or(PlanError::MissingImageProvider)?,
            roster_provider: self
                .roster_provider
                .ok_or(PlanError::MissingRosterProvider)?,
        })
    }
}
