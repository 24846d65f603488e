use adforge::errors::PlanError;
use adforge::providers::ai::{ChatProvider, ImageProvider};
use adforge::roster::{InfluencerRecord, RosterError, RosterProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock Chat Provider ---

#[derive(Clone, Debug)]
pub struct MockChatProvider {
    responses: Arc<Mutex<HashMap<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChatProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the rendered prompt.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(key.to_string(), response.to_string());
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockChatProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn generate(&self, instruction: &str, prompt: &str) -> Result<String, PlanError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((instruction.to_string(), prompt.to_string()));

        let responses = self.responses.lock().unwrap();
        for (key, response) in responses.iter() {
            if prompt.contains(key) || instruction.contains(key) {
                return Ok(response.clone());
            }
        }

        Err(PlanError::AiApi(format!(
            "MockChatProvider: No response programmed for prompt. Got: '{prompt}'"
        )))
    }
}

// --- Mock Image Provider ---

/// An image provider returning deterministic URLs, with optional per-prompt
/// failures keyed by a substring of the image prompt.
#[derive(Clone, Debug)]
pub struct MockImageProvider {
    fail_keys: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockImageProvider {
    pub fn new() -> Self {
        Self {
            fail_keys: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Makes calls whose prompt contains `key` fail.
    pub fn fail_for(&self, key: &str) {
        self.fail_keys.lock().unwrap().push(key.to_string());
    }

    /// Retrieves the recorded image prompts for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockImageProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate_image(&self, prompt: &str) -> Result<String, PlanError> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(prompt.to_string());
            calls.len() - 1
        };

        let fail_keys = self.fail_keys.lock().unwrap();
        if fail_keys.iter().any(|key| prompt.contains(key)) {
            return Err(PlanError::AiApi(format!(
                "MockImageProvider: programmed failure for prompt: '{prompt}'"
            )));
        }

        Ok(format!("https://mock.images.test/{call_index}.png"))
    }
}

// --- Mock Roster Provider ---

/// A roster provider backed by a fixed record list.
#[derive(Clone, Debug)]
pub struct MockRosterProvider {
    records: Vec<InfluencerRecord>,
}

impl MockRosterProvider {
    pub fn new(records: Vec<InfluencerRecord>) -> Self {
        Self { records }
    }
}

impl Default for MockRosterProvider {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl RosterProvider for MockRosterProvider {
    async fn fetch(&self) -> Result<Vec<InfluencerRecord>, RosterError> {
        Ok(self.records.clone())
    }
}
