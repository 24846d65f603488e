//! # Prompt Templates
//!
//! This module holds the prompt templates used by the campaign generation
//! pipeline, plus the builders that render them.

pub mod campaign;

pub use campaign::{build_image_prompt, build_plan_prompt};
