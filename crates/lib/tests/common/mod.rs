#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Local mock providers for exercising the pipeline without any network.

use adforge::errors::PlanError;
use adforge::providers::ai::{ChatProvider, ImageProvider};
use adforge::roster::{InfluencerRecord, RosterError, RosterProvider};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// A chat provider that returns a canned response and records every call.
#[derive(Clone, Debug)]
pub struct MockChatProvider {
    pub response: String,
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockChatProvider {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            call_history: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn generate(&self, instruction: &str, prompt: &str) -> Result<String, PlanError> {
        self.call_history
            .write()
            .unwrap()
            .push((instruction.to_string(), prompt.to_string()));
        Ok(self.response.clone())
    }
}

/// An image provider that fails for selected call indices and records the
/// prompts it was asked for.
#[derive(Clone, Debug)]
pub struct MockImageProvider {
    pub fail_on_calls: Vec<usize>,
    pub prompts: Arc<RwLock<Vec<String>>>,
}

impl MockImageProvider {
    pub fn new() -> Self {
        Self {
            fail_on_calls: Vec::new(),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fails the calls at the given zero-based indices.
    pub fn failing_on(fail_on_calls: Vec<usize>) -> Self {
        Self {
            fail_on_calls,
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate_image(&self, prompt: &str) -> Result<String, PlanError> {
        let call_index = {
            let mut prompts = self.prompts.write().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };

        if self.fail_on_calls.contains(&call_index) {
            return Err(PlanError::AiApi("mock image failure".to_string()));
        }
        Ok(format!("https://images.example.com/{call_index}.png"))
    }
}

/// A roster provider backed by a fixed record list or a fixed error.
#[derive(Clone, Debug)]
pub struct MockRosterProvider {
    pub records: Vec<InfluencerRecord>,
    pub fail: bool,
}

impl MockRosterProvider {
    pub fn with_records(records: Vec<InfluencerRecord>) -> Self {
        Self {
            records,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl RosterProvider for MockRosterProvider {
    async fn fetch(&self) -> Result<Vec<InfluencerRecord>, RosterError> {
        if self.fail {
            return Err(RosterError::Fetch("mock roster failure".to_string()));
        }
        Ok(self.records.clone())
    }
}
