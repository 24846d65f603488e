pub mod gemini;
pub mod image;
pub mod openai;

use crate::errors::PlanError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for chat-completion providers.
///
/// This trait defines a common interface for turning a rendered campaign
/// prompt into raw model text, across different backends (OpenAI-compatible
/// APIs, Gemini).
#[async_trait]
pub trait ChatProvider: Send + Sync + Debug + DynClone {
    /// Sends one blocking completion request and returns the model's text.
    ///
    /// `instruction` is the general system instruction; `prompt` is the
    /// fully rendered campaign prompt.
    async fn generate(&self, instruction: &str, prompt: &str) -> Result<String, PlanError>;
}

dyn_clone::clone_trait_object!(ChatProvider);

/// A trait for image-generation providers.
#[async_trait]
pub trait ImageProvider: Send + Sync + Debug + DynClone {
    /// Generates a single image for the given prompt and returns its URL.
    async fn generate_image(&self, prompt: &str) -> Result<String, PlanError>;
}

dyn_clone::clone_trait_object!(ImageProvider);
