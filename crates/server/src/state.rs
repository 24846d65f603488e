//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds all shared resources, such
//! as the configuration, the database connection, and the assembled campaign
//! generation client, making them accessible to all request handlers.

use crate::config::{AppConfig, ProviderConfig};
use adforge::{
    providers::{
        ai::{
            gemini::GeminiChatProvider,
            image::OpenAiImageProvider,
            openai::OpenAiChatProvider,
            ChatProvider,
        },
        db::sqlite::SqliteProvider,
    },
    PlanClient, PlanClientBuilder,
};
use adforge_roster::SheetRoster;
use std::sync::Arc;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The primary database provider for campaign persistence.
    pub sqlite_provider: Arc<SqliteProvider>,
    /// The assembled campaign generation pipeline.
    pub plan_client: Arc<PlanClient>,
}

/// Looks up a named provider from the `providers` section of the configuration.
fn provider_config<'a>(
    config: &'a AppConfig,
    name: &str,
    purpose: &str,
) -> anyhow::Result<&'a ProviderConfig> {
    config.providers.get(name).ok_or_else(|| {
        anyhow::anyhow!("The {purpose} provider '{name}' is not defined in the providers section")
    })
}

/// Instantiates a chat provider client from a provider configuration entry.
fn build_chat_provider(
    name: &str,
    provider_config: &ProviderConfig,
) -> anyhow::Result<Box<dyn ChatProvider>> {
    let provider: Box<dyn ChatProvider> = match provider_config.provider.as_str() {
        "gemini" => {
            let api_key = provider_config.api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("api_key is required for gemini provider '{name}'")
            })?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = provider_config.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    provider_config.model_name
                )
            });
            Box::new(GeminiChatProvider::new(api_url, api_key)?)
        }
        "openai" | "local" => {
            // For OpenAI-compatible providers, the URL is always required.
            let api_url = provider_config.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("api_url is required for provider '{name}'")
            })?;
            Box::new(OpenAiChatProvider::new(
                api_url,
                provider_config.api_key.clone(),
                Some(provider_config.model_name.clone()),
            )?)
        }
        _ => {
            return Err(anyhow::anyhow!(
                "Unsupported AI provider type '{}' for provider '{}'",
                provider_config.provider,
                name
            ));
        }
    };
    Ok(provider)
}

/// Builds the shared application state from the configuration.
///
/// This function initializes all necessary services:
/// - It instantiates the chat and image provider clients named in the
///   `generation` section of the configuration.
/// - It wires the influencer roster source against the configured sheet.
/// - It sets up the connection to the SQLite database.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let chat_name = &config.generation.chat_provider;
    let chat_provider = build_chat_provider(chat_name, provider_config(&config, chat_name, "chat")?)?;

    // Image rendering only speaks the OpenAI images API.
    let image_name = &config.generation.image_provider;
    let image_config = provider_config(&config, image_name, "image")?;
    let image_provider = match image_config.provider.as_str() {
        "openai" | "local" => {
            let api_url = image_config.api_url.clone().ok_or_else(|| {
                anyhow::anyhow!("api_url is required for image provider '{image_name}'")
            })?;
            OpenAiImageProvider::new(
                api_url,
                image_config.api_key.clone(),
                Some(image_config.model_name.clone()),
            )?
        }
        other => {
            return Err(anyhow::anyhow!(
                "Unsupported image provider type '{other}' for provider '{image_name}'"
            ));
        }
    };

    let roster_provider = SheetRoster::new(config.roster.sheet_url.clone(), config.roster.gid.clone());

    let plan_client = PlanClientBuilder::new()
        .chat_provider(chat_provider)
        .image_provider(Box::new(image_provider))
        .roster_provider(Box::new(roster_provider))
        .build()?;

    // The provider for campaign persistence.
    let sqlite_provider = SqliteProvider::new(&config.db_url).await?;
    tracing::info!(db_path = %config.db_url, "Initialized local storage provider (SQLite).");
    // Ensure the database schema is up-to-date on startup.
    sqlite_provider.initialize_schema().await?;

    Ok(AppState {
        config: Arc::new(config),
        sqlite_provider: Arc::new(sqlite_provider),
        plan_client: Arc::new(plan_client),
    })
}
