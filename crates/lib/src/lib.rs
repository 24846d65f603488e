//! # AI Campaign Generation
//!
//! This crate turns a brand's campaign request into a persisted campaign
//! plan: it renders a prompt from the request and the influencer roster,
//! calls a chat-completion provider once, reconciles the untrusted model
//! output into a stable shape, and enriches each content suggestion with a
//! generated image.

pub mod errors;
pub mod prompts;
pub mod providers;
pub mod reconcile;
pub mod roster;
pub mod types;

pub use errors::PlanError;
pub use types::{Campaign, CampaignRequest, PlanClient, PlanClientBuilder};

use tracing::{debug, info};

impl PlanClient {
    /// Runs the full generation pipeline for one campaign request.
    ///
    /// The stages are:
    ///
    /// 1. Fetch the influencer roster. A fetch failure or an empty roster
    ///    degrades to the no-data sentinel; it never fails the request.
    /// 2. Render the campaign prompt and send one completion request.
    ///    Transport and API errors here do propagate.
    /// 3. Reconcile the raw model text into a plan outline.
    /// 4. Generate one image per content suggestion, sequentially, with
    ///    per-item failures isolated.
    ///
    /// The returned campaign is not yet persisted; callers hand it to a
    /// `CampaignStore`.
    pub async fn generate_plan(
        &self,
        brand_id: &str,
        request: &CampaignRequest,
    ) -> Result<Campaign, PlanError> {
        info!(campaign_type = request.kind_tag(), "[generate_plan] Starting campaign generation");

        let roster_block = match self.roster_provider.fetch().await {
            Ok(records) => {
                debug!(count = records.len(), "[generate_plan] Roster fetched");
                roster::echo_block(&records)
            }
            Err(e) => {
                // The roster is best-effort context for the model, so a
                // broken source must not block campaign generation.
                tracing::warn!(error = %e, "[generate_plan] Roster fetch failed, continuing without influencer data");
                roster::NO_INFLUENCER_DATA.to_string()
            }
        };

        let prompt = prompts::build_plan_prompt(request, &roster_block);
        debug!(prompt_len = prompt.len(), "[generate_plan] Prompt rendered");

        let raw_response = self
            .chat_provider
            .generate(prompts::campaign::PLAN_SYSTEM_INSTRUCTION, &prompt)
            .await?;

        let mut outline = reconcile::reconcile_plan(&raw_response);
        let drafts = std::mem::take(&mut outline.suggestion_drafts);
        info!(
            suggestions = drafts.len(),
            advice = outline.more_advice.len(),
            "[generate_plan] Plan reconciled"
        );

        let suggestions =
            reconcile::enrich_suggestions(self.image_provider.as_ref(), request, drafts).await;

        Ok(reconcile::assemble_campaign(
            brand_id,
            request,
            raw_response,
            outline,
            suggestions,
        ))
    }
}
