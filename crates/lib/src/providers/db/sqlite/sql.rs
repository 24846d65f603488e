//! # SQLite SQL Statements
//!
//! This module centralizes the SQL strings used by the SQLite provider, so
//! the provider logic stays free of database-specific syntax.

/// Creates the `users` table for identity records.
pub const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        role TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
";

/// Creates the `campaigns` table. List-valued plan fields are stored as JSON
/// text so their order survives a round trip unchanged.
pub const CREATE_CAMPAIGNS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS campaigns (
        id TEXT PRIMARY KEY,
        brand_id TEXT NOT NULL,
        name TEXT NOT NULL,
        campaign_type TEXT NOT NULL,
        status TEXT NOT NULL,
        objective TEXT NOT NULL,
        target_audience TEXT NOT NULL,
        duration TEXT NOT NULL,
        budget TEXT NOT NULL,
        influencer_collaboration TEXT NOT NULL,
        about_campaign TEXT NOT NULL,
        calendar_events TEXT NOT NULL,
        bingo_suggestions TEXT NOT NULL,
        more_advice TEXT NOT NULL,
        ai_response TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
";

/// Index for the brand-scoped campaign listing.
pub const CREATE_CAMPAIGNS_BRAND_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_campaigns_brand_id ON campaigns(brand_id);";

/// All statements run by `initialize_schema`, in order.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_CAMPAIGNS_TABLE,
    CREATE_CAMPAIGNS_BRAND_INDEX,
];

pub const INSERT_CAMPAIGN: &str = "
    INSERT INTO campaigns (
        id, brand_id, name, campaign_type, status, objective, target_audience,
        duration, budget, influencer_collaboration, about_campaign,
        calendar_events, bingo_suggestions, more_advice, ai_response, created_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?);
";

pub const SELECT_CAMPAIGN_COLUMNS: &str = "
    id, brand_id, name, campaign_type, status, objective, target_audience,
    duration, budget, influencer_collaboration, about_campaign,
    calendar_events, bingo_suggestions, more_advice, ai_response, created_at
";
