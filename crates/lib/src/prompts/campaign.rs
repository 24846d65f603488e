//! # Campaign Prompt Templates
//!
//! Hardcoded templates for the campaign plan prompt. The rendered prompt has
//! three parts: the output-schema instructions, a campaign-type-specific
//! brief, and the candidate influencer section.

use crate::types::{CampaignBrief, CampaignRequest};

/// General instruction sent as the first system message of every request.
pub const PLAN_SYSTEM_INSTRUCTION: &str = r#"You are an expert influencer-marketing strategist. You design practical social media campaign plans for brands and match them with suitable influencer creators. Respond ONLY with a single valid JSON object that follows the requested schema exactly. Do not wrap the JSON in markdown code fences and do not include any other text or explanations."#;

/// Fixed output-schema block prepended to every campaign prompt.
pub const PLAN_OUTPUT_FORMAT: &str = r#"# Output JSON Schema
Return a single JSON object with exactly these keys:
{
  "objective": "<one paragraph stating the campaign objective>",
  "targetAudience": "<who this campaign should reach>",
  "duration": "<campaign duration, e.g. '4 weeks'>",
  "budget": "<suggested budget range for the campaign>",
  "influencerCollaboration": "<how the brand should collaborate with influencers overall>",
  "aboutCampaign": "<a short narrative describing the campaign>",
  "calendarEvents": [
    { "date": "YYYY-MM-DD", "event": "<post or activity>", "platforms": ["<platform>"], "cta": "<call to action>", "captions": "<suggested caption>" }
  ],
  "bingoSuggestions": [
    { "suggestion": "<content idea>", "strategy": "<why this idea works>" }
  ],
  "moreAdvice": [ <one object per candidate influencer, as instructed in the Candidate Influencers section> ]
}

# Rules
1. `calendarEvents` must cover the campaign timeframe in chronological order.
2. `bingoSuggestions` must contain exactly 5 entries.
3. Every value must be plain text. Do not nest objects deeper than shown above."#;

// --- Campaign-type briefs ---

pub const AMPLIFY_BRIEF: &str = r#"# Campaign Brief: Amplify Brand Awareness
- Business: {describe_business}
- Industry: {industry}
- Timeframe: {timeframe_start} to {timeframe_end}
- Platforms: {platforms}
- Market trends to build on: {market_trends}
- Target audience: {target_audience}
- Brand USP: {brand_usp}"#;

pub const MARKET_PRODUCT_BRIEF: &str = r#"# Campaign Brief: Market a Product
- Business: {describe_business}
- Industry: {industry}
- Timeframe: {timeframe_start} to {timeframe_end}
- Platforms: {platforms}
- Product name: {product_name}
- Product details: {product_details}
- Product USP: {product_usp}"#;

pub const DRIVE_SALES_BRIEF: &str = r#"# Campaign Brief: Drive Sales
- Business: {describe_business}
- Industry: {industry}
- Timeframe: {timeframe_start} to {timeframe_end}
- Platforms: {platforms}
- Promotional offers: {promotional_offers}
- Sales target: {sales_target}"#;

pub const FIND_NEW_CUSTOMERS_BRIEF: &str = r#"# Campaign Brief: Find New Customers
- Business: {describe_business}
- Industry: {industry}
- Timeframe: {timeframe_start} to {timeframe_end}
- Platforms: {platforms}
- Current audience: {current_audience}
- Desired audience: {desired_audience}"#;

pub const DRIVE_EVENT_AWARENESS_BRIEF: &str = r#"# Campaign Brief: Drive Event Awareness
- Business: {describe_business}
- Industry: {industry}
- Timeframe: {timeframe_start} to {timeframe_end}
- Platforms: {platforms}
- Event name: {event_name}
- Event details: {event_details}
- Event date: {event_date}"#;

pub const CUSTOM_BRIEF: &str = r#"# Campaign Brief
- Business: {describe_business}
- Industry: {industry}
- Timeframe: {timeframe_start} to {timeframe_end}
- Platforms: {platforms}
- Campaign goal: {campaign_goal}"#;

/// Header for the candidate influencer section. The echoed records follow,
/// one JSON object per line.
pub const ROSTER_SECTION_HEADER: &str = r#"# Candidate Influencers
For `moreAdvice`, output one JSON object per candidate listed below. Copy every field verbatim and unmodified, and replace only the `recommendedCollab` value with your own recommendation."#;

/// Template for the per-suggestion image prompt.
pub const IMAGE_PROMPT_TEMPLATE: &str = r#"Create a vibrant social media marketing image for an influencer campaign. Business: {describe_business}. Industry: {industry}. Content idea: {suggestion}. The image must contain no text, logos, or watermarks."#;

fn render_brief_fields(template: &str, brief: &CampaignBrief) -> String {
    template
        .replace("{describe_business}", &brief.describe_business)
        .replace("{industry}", &brief.industry)
        .replace("{timeframe_start}", &brief.timeframe_start)
        .replace("{timeframe_end}", &brief.timeframe_end)
        .replace("{platforms}", &brief.platforms)
}

/// Renders the campaign-type-specific brief for a request.
fn render_campaign_brief(request: &CampaignRequest) -> String {
    match request {
        CampaignRequest::Amplify {
            brief,
            market_trends,
            target_audience,
            brand_usp,
        } => render_brief_fields(AMPLIFY_BRIEF, brief)
            .replace("{market_trends}", market_trends)
            .replace("{target_audience}", target_audience)
            .replace("{brand_usp}", brand_usp),
        CampaignRequest::MarketProduct {
            brief,
            product_name,
            product_details,
            product_usp,
        } => render_brief_fields(MARKET_PRODUCT_BRIEF, brief)
            .replace("{product_name}", product_name)
            .replace("{product_details}", product_details)
            .replace("{product_usp}", product_usp),
        CampaignRequest::DriveSales {
            brief,
            promotional_offers,
            sales_target,
        } => render_brief_fields(DRIVE_SALES_BRIEF, brief)
            .replace("{promotional_offers}", promotional_offers)
            .replace("{sales_target}", sales_target),
        CampaignRequest::FindNewCustomers {
            brief,
            current_audience,
            desired_audience,
        } => render_brief_fields(FIND_NEW_CUSTOMERS_BRIEF, brief)
            .replace("{current_audience}", current_audience)
            .replace("{desired_audience}", desired_audience),
        CampaignRequest::DriveEventAwareness {
            brief,
            event_name,
            event_details,
            event_date,
        } => render_brief_fields(DRIVE_EVENT_AWARENESS_BRIEF, brief)
            .replace("{event_name}", event_name)
            .replace("{event_details}", event_details)
            .replace("{event_date}", event_date),
        CampaignRequest::Custom {
            brief,
            campaign_goal,
        } => render_brief_fields(CUSTOM_BRIEF, brief).replace("{campaign_goal}", campaign_goal),
    }
}

/// Builds the full campaign prompt from a request and a pre-rendered roster
/// block.
///
/// `roster_block` is either one echoed JSON object per influencer or the
/// no-data sentinel when the roster could not be fetched.
pub fn build_plan_prompt(request: &CampaignRequest, roster_block: &str) -> String {
    format!(
        "{PLAN_OUTPUT_FORMAT}\n\n{}\n\n{ROSTER_SECTION_HEADER}\n{roster_block}",
        render_campaign_brief(request)
    )
}

/// Builds the image-generation prompt for one content suggestion.
pub fn build_image_prompt(request: &CampaignRequest, suggestion: &str) -> String {
    let brief = request.brief();
    IMAGE_PROMPT_TEMPLATE
        .replace("{describe_business}", &brief.describe_business)
        .replace("{industry}", &brief.industry)
        .replace("{suggestion}", suggestion)
}
