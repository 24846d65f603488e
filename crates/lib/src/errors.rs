use thiserror::Error;

/// Errors that can occur while generating or persisting a campaign plan.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The reqwest client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ReqwestClientBuild(reqwest::Error),

    /// The request to the AI provider could not be sent.
    #[error("AI request failed: {0}")]
    AiRequest(reqwest::Error),

    /// The AI provider returned a non-success status.
    #[error("AI API returned an error: {0}")]
    AiApi(String),

    /// The AI provider's response body could not be deserialized.
    #[error("Failed to deserialize AI response: {0}")]
    AiDeserialization(reqwest::Error),

    /// The storage backend could not be reached or opened.
    #[error("Storage connection failed: {0}")]
    StorageConnection(String),

    /// A storage query or statement failed.
    #[error("Storage operation failed: {0}")]
    StorageOperationFailed(String),

    /// A value could not be serialized to or from JSON for storage.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// The client builder was missing a chat provider.
    #[error("Chat provider is required")]
    MissingChatProvider,

    /// The client builder was missing an image provider.
    #[error("Image provider is required")]
    MissingImageProvider,

    /// The client builder was missing a roster provider.
    #[error("Roster provider is required")]
    MissingRosterProvider,
}

impl From<turso::Error> for PlanError {
    fn from(err: turso::Error) -> Self {
        PlanError::StorageOperationFailed(err.to_string())
    }
}
