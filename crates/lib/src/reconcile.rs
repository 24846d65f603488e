//! # Response Reconciler
//!
//! Normalizes raw model output into a persistable plan. Model output is
//! untrusted input: every function here is total, so a malformed or
//! partially malformed completion degrades to defaults instead of failing
//! the request.

use crate::prompts;
use crate::providers::ai::ImageProvider;
use crate::types::{AdviceEntry, BingoSuggestion, CalendarEvent, Campaign, CampaignRequest};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

/// Identity-field placeholder for advice entries that arrive as plain text.
pub const UNKNOWN_SENTINEL: &str = "Unknown";

/// Status assigned to every newly generated campaign.
pub const INITIAL_STATUS: &str = "draft";

/// Plan fields recovered from raw model text, before image enrichment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanOutline {
    pub objective: String,
    pub target_audience: String,
    pub duration: String,
    pub budget: String,
    pub influencer_collaboration: String,
    pub about_campaign: String,
    pub calendar_events: Vec<CalendarEvent>,
    pub suggestion_drafts: Vec<SuggestionDraft>,
    pub more_advice: Vec<AdviceEntry>,
}

/// A content suggestion before image enrichment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionDraft {
    pub suggestion: String,
    pub strategy: String,
}

/// Coerces one JSON value to display text. Strings pass through; numbers
/// and booleans render as text; anything else is empty.
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn text_at(parsed: &Value, key: &str) -> String {
    parsed.get(key).map(value_to_text).unwrap_or_default()
}

fn text_in(map: &Map<String, Value>, key: &str) -> String {
    map.get(key).map(value_to_text).unwrap_or_default()
}

fn array_at<'a>(parsed: &'a Value, key: &str) -> &'a [Value] {
    parsed
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Parses raw model text into a [`PlanOutline`].
///
/// On a JSON syntax failure the outline is empty; the raw text still ends up
/// on the campaign's `ai_response` field, so nothing is lost. No retry or
/// repair is attempted beyond this fallback.
pub fn reconcile_plan(raw: &str) -> PlanOutline {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Model output is not valid JSON, falling back to an empty plan");
            return PlanOutline::default();
        }
    };

    PlanOutline {
        objective: text_at(&parsed, "objective"),
        target_audience: text_at(&parsed, "targetAudience"),
        duration: text_at(&parsed, "duration"),
        budget: text_at(&parsed, "budget"),
        influencer_collaboration: text_at(&parsed, "influencerCollaboration"),
        about_campaign: text_at(&parsed, "aboutCampaign"),
        calendar_events: array_at(&parsed, "calendarEvents")
            .iter()
            .map(coerce_calendar_event)
            .collect(),
        suggestion_drafts: array_at(&parsed, "bingoSuggestions")
            .iter()
            .map(coerce_suggestion)
            .collect(),
        more_advice: array_at(&parsed, "moreAdvice")
            .iter()
            .map(normalize_advice_entry)
            .collect(),
    }
}

fn coerce_calendar_event(value: &Value) -> CalendarEvent {
    let Some(map) = value.as_object() else {
        return CalendarEvent::default();
    };

    let platforms = match map.get("platforms") {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_text)
            .filter(|p| !p.is_empty())
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    };

    CalendarEvent {
        date: text_in(map, "date"),
        event: text_in(map, "event"),
        platforms,
        cta: text_in(map, "cta"),
        captions: text_in(map, "captions"),
    }
}

/// Bare strings become `{ suggestion }` drafts with no strategy.
fn coerce_suggestion(value: &Value) -> SuggestionDraft {
    match value {
        Value::String(s) => SuggestionDraft {
            suggestion: s.clone(),
            strategy: String::new(),
        },
        Value::Object(map) => SuggestionDraft {
            suggestion: text_in(map, "suggestion"),
            strategy: text_in(map, "strategy"),
        },
        other => SuggestionDraft {
            suggestion: other.to_string(),
            strategy: String::new(),
        },
    }
}

/// Normalizes one `moreAdvice` entry.
///
/// Objects pass through field by field. A string that itself parses as a
/// JSON object is adopted. Any other string becomes a placeholder record
/// with every identity field set to [`UNKNOWN_SENTINEL`] and the string kept
/// as the recommendation.
pub fn normalize_advice_entry(value: &Value) -> AdviceEntry {
    match value {
        Value::Object(map) => advice_from_map(map),
        Value::String(s) => {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(s) {
                advice_from_map(&map)
            } else {
                placeholder_advice(s.clone())
            }
        }
        other => placeholder_advice(other.to_string()),
    }
}

fn advice_from_map(map: &Map<String, Value>) -> AdviceEntry {
    AdviceEntry {
        name: text_in(map, "name"),
        username: text_in(map, "username"),
        platform: text_in(map, "platform"),
        location: text_in(map, "location"),
        followers: text_in(map, "followers"),
        engagement_rate: text_in(map, "engagementRate"),
        recommended_collab: text_in(map, "recommendedCollab"),
    }
}

fn placeholder_advice(recommendation: String) -> AdviceEntry {
    AdviceEntry {
        name: UNKNOWN_SENTINEL.to_string(),
        username: UNKNOWN_SENTINEL.to_string(),
        platform: UNKNOWN_SENTINEL.to_string(),
        location: UNKNOWN_SENTINEL.to_string(),
        followers: UNKNOWN_SENTINEL.to_string(),
        engagement_rate: UNKNOWN_SENTINEL.to_string(),
        recommended_collab: recommendation,
    }
}

/// Attaches a generated image URL to each suggestion.
///
/// Calls are issued strictly sequentially in array order. A failed call
/// leaves that entry's URL empty and never aborts the batch.
pub async fn enrich_suggestions(
    image_provider: &dyn ImageProvider,
    request: &CampaignRequest,
    drafts: Vec<SuggestionDraft>,
) -> Vec<BingoSuggestion> {
    let mut suggestions = Vec::with_capacity(drafts.len());

    for draft in drafts {
        let image_prompt = prompts::build_image_prompt(request, &draft.suggestion);
        let image_url = match image_provider.generate_image(&image_prompt).await {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, suggestion = %draft.suggestion, "Image generation failed, leaving imageUrl empty");
                String::new()
            }
        };
        suggestions.push(BingoSuggestion {
            suggestion: draft.suggestion,
            strategy: draft.strategy,
            image_url,
        });
    }

    suggestions
}

/// Derives the campaign display name from its wire tag by inserting a space
/// before each capital letter: `driveEventAwareness` becomes
/// `"drive Event Awareness Plan (AI)"`.
pub fn campaign_display_name(kind_tag: &str) -> String {
    let mut name = String::with_capacity(kind_tag.len() + 12);
    for c in kind_tag.chars() {
        if c.is_uppercase() {
            name.push(' ');
        }
        name.push(c);
    }
    name.push_str(" Plan (AI)");
    name
}

/// Assembles the final persisted record from the reconciled pieces.
pub fn assemble_campaign(
    brand_id: &str,
    request: &CampaignRequest,
    raw_response: String,
    outline: PlanOutline,
    suggestions: Vec<BingoSuggestion>,
) -> Campaign {
    Campaign {
        id: Uuid::new_v4().to_string(),
        brand_id: brand_id.to_string(),
        name: campaign_display_name(request.kind_tag()),
        campaign_type: request.kind_tag().to_string(),
        status: INITIAL_STATUS.to_string(),
        objective: outline.objective,
        target_audience: outline.target_audience,
        duration: outline.duration,
        budget: outline.budget,
        influencer_collaboration: outline.influencer_collaboration,
        about_campaign: outline.about_campaign,
        calendar_events: outline.calendar_events,
        bingo_suggestions: suggestions,
        more_advice: outline.more_advice,
        ai_response: raw_response,
        created_at: Utc::now(),
    }
}
