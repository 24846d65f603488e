//! # Campaign Route Handlers
//!
//! This module contains the handler for the AI campaign generation endpoint.
//! It runs the full pipeline: prompt assembly, the completion call, response
//! reconciliation, image enrichment, and persistence of the finished campaign.

use crate::{auth::middleware::AuthenticatedUser, errors::AppError, state::AppState};
use adforge::{providers::db::storage::CampaignStore, Campaign, CampaignRequest};
use adforge_access::Role;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

/// The response body for a successfully generated campaign.
#[derive(Serialize)]
pub struct GenerateCampaignResponse {
    pub message: String,
    /// The full persisted campaign document.
    pub campaign: Campaign,
}

/// The handler for the `POST /api/ai/generateCampaign` endpoint.
///
/// Only brand accounts may generate campaigns. The generated campaign is
/// persisted before the response is returned, so a `201` always means the
/// document exists in storage.
pub async fn generate_campaign_handler(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CampaignRequest>,
) -> Result<(StatusCode, Json<GenerateCampaignResponse>), AppError> {
    if user.role != Role::Brand {
        return Err(AppError::Forbidden(
            "Only brand accounts can generate campaigns.".to_string(),
        ));
    }

    info!(
        brand_id = %user.id,
        campaign_type = payload.kind_tag(),
        "Received campaign generation request"
    );

    let campaign = app_state
        .plan_client
        .generate_plan(&user.id, &payload)
        .await?;

    app_state.sqlite_provider.insert_campaign(&campaign).await?;
    info!(campaign_id = %campaign.id, "Campaign persisted");

    Ok((
        StatusCode::CREATED,
        Json(GenerateCampaignResponse {
            message: "Campaign generated successfully.".to_string(),
            campaign,
        }),
    ))
}
