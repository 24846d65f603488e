//! # `adforge-roster`: Google Sheets Roster Plugin
//!
//! This crate fetches the influencer roster from a Google Sheet as a
//! self-contained plugin for the `adforge` pipeline. It implements the
//! `RosterProvider` trait from the core `adforge` library.

use adforge::roster::{InfluencerRecord, RosterError, RosterProvider};
use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;
use tracing::info;

// --- Error Definitions ---

#[derive(Error, Debug, Clone)]
pub enum SheetError {
    #[error("Invalid Google Sheet URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to fetch sheet: {0}")]
    Fetch(String),
    #[error("Failed to parse sheet CSV: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SheetError {
    fn from(err: reqwest::Error) -> Self {
        SheetError::Fetch(err.to_string())
    }
}

/// A helper to convert the specific `SheetError` into the generic
/// `adforge::roster::RosterError`.
impl From<SheetError> for RosterError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::InvalidUrl(msg) => RosterError::InvalidUrl(msg),
            SheetError::Fetch(msg) => RosterError::Fetch(msg),
            SheetError::Parse(msg) => RosterError::Parse(msg),
        }
    }
}

// --- Column Aliases ---

// Sheets are maintained by hand, so column headers vary. Headers are
// sanitized (trimmed, lowercased, spaces to underscores) before matching.
const NAME_ALIASES: &[&str] = &["name", "influencer_name", "influencer"];
const USERNAME_ALIASES: &[&str] = &["username", "handle", "instagram_handle", "ig_handle"];
const PLATFORM_ALIASES: &[&str] = &["platform", "channel"];
const LOCATION_ALIASES: &[&str] = &["location", "city", "country"];
const FOLLOWERS_ALIASES: &[&str] = &["followers", "follower_count", "audience"];
const ENGAGEMENT_ALIASES: &[&str] = &["engagement_rate", "engagement", "er"];

// --- Public Helper Functions ---

/// Transforms a Google Sheet URL into a CSV export URL.
pub fn construct_export_url(url_str: &str, gid: Option<&str>) -> Result<String, SheetError> {
    let parsed_url =
        reqwest::Url::parse(url_str).map_err(|e| SheetError::InvalidUrl(format!("{e}")))?;

    let re = Regex::new(r"/spreadsheets/d/([a-zA-Z0-9-_]+)")
        .map_err(|e| SheetError::InvalidUrl(format!("Regex compilation failed: {e}")))?;
    let caps = re.captures(parsed_url.path()).ok_or_else(|| {
        SheetError::InvalidUrl("Could not find sheet ID in URL path.".to_string())
    })?;

    let spreadsheets_id = caps
        .get(1)
        .map(|m| m.as_str())
        .ok_or_else(|| SheetError::InvalidUrl("Sheet ID capture group is missing.".to_string()))?;

    let base_url = match parsed_url.host_str() {
        Some("127.0.0.1") | Some("localhost") => {
            format!("{}://{}", parsed_url.scheme(), parsed_url.authority())
        }
        _ => "https://docs.google.com".to_string(),
    };
    let mut export_url = format!("{base_url}/spreadsheets/d/{spreadsheets_id}/export?format=csv");

    if let Some(gid_val) = gid {
        if !gid_val.is_empty() {
            export_url.push_str(&format!("&gid={gid_val}"));
        }
    }

    Ok(export_url)
}

/// Downloads the content of a Google Sheet as a CSV string.
pub async fn download_csv(export_url: &str) -> Result<String, SheetError> {
    info!("Fetching roster sheet CSV from: {export_url}");
    let response = reqwest::get(export_url).await?;
    if !response.status().is_success() {
        return Err(SheetError::Fetch(format!(
            "Request failed with status: {}",
            response.status()
        )));
    }
    response.text().await.map_err(SheetError::from)
}

fn sanitize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.contains(&sanitize_header(h).as_str()))
}

/// Parses roster CSV data into influencer records.
///
/// Columns are matched by alias, missing columns default to empty fields,
/// and rows with no recognized data at all are skipped.
pub fn parse_roster_csv(csv_data: &str) -> Result<Vec<InfluencerRecord>, SheetError> {
    let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| SheetError::Parse(e.to_string()))?
        .clone();

    let name_idx = find_column(&headers, NAME_ALIASES);
    let username_idx = find_column(&headers, USERNAME_ALIASES);
    let platform_idx = find_column(&headers, PLATFORM_ALIASES);
    let location_idx = find_column(&headers, LOCATION_ALIASES);
    let followers_idx = find_column(&headers, FOLLOWERS_ALIASES);
    let engagement_idx = find_column(&headers, ENGAGEMENT_ALIASES);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| SheetError::Parse(e.to_string()))?;
        let field = |idx: Option<usize>| -> String {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .unwrap_or("")
                .to_string()
        };

        let record = InfluencerRecord {
            name: field(name_idx),
            username: field(username_idx),
            platform: field(platform_idx),
            location: field(location_idx),
            followers: field(followers_idx),
            engagement_rate: field(engagement_idx),
        };

        if record == InfluencerRecord::default() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

// --- RosterProvider Implementation ---

/// A `RosterProvider` backed by a Google Sheet.
///
/// The sheet is re-fetched on every call, so roster edits take effect on the
/// next campaign generation without a restart.
#[derive(Clone, Debug)]
pub struct SheetRoster {
    sheet_url: String,
    gid: Option<String>,
}

impl SheetRoster {
    /// Creates a new `SheetRoster` for the given sheet URL and optional tab.
    pub fn new(sheet_url: String, gid: Option<String>) -> Self {
        Self { sheet_url, gid }
    }
}

#[async_trait]
impl RosterProvider for SheetRoster {
    async fn fetch(&self) -> Result<Vec<InfluencerRecord>, RosterError> {
        let export_url = construct_export_url(&self.sheet_url, self.gid.as_deref())?;
        let csv_data = download_csv(&export_url).await?;
        Ok(parse_roster_csv(&csv_data)?)
    }
}
