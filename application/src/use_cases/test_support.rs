//! Hand-written fakes shared by use case tests

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::preference_repository::{PreferenceRepository, RepositoryError};
use async_trait::async_trait;
use packvote_domain::{GroupId, Model, Preference, TravelStyle};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn goa_pair() -> Vec<Preference> {
    vec![
        Preference::new(3000.0, "Goa", 4, TravelStyle::Relaxation, "spices").unwrap(),
        Preference::new(5000.0, "Goa", 6, TravelStyle::Adventure, "clothes").unwrap(),
    ]
}

// ==================== Repository ====================

#[derive(Default)]
pub struct FakeRepository {
    groups: Mutex<HashMap<GroupId, Vec<Preference>>>,
}

impl FakeRepository {
    pub fn seed(&self, group: &GroupId, records: Vec<Preference>) {
        self.groups
            .lock()
            .unwrap()
            .entry(group.clone())
            .or_default()
            .extend(records);
    }

    pub fn records(&self, group: &GroupId) -> Vec<Preference> {
        self.groups
            .lock()
            .unwrap()
            .get(group)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl PreferenceRepository for FakeRepository {
    async fn insert(
        &self,
        group: &GroupId,
        preference: Preference,
    ) -> Result<usize, RepositoryError> {
        self.insert_many(group, vec![preference]).await
    }

    async fn insert_many(
        &self,
        group: &GroupId,
        preferences: Vec<Preference>,
    ) -> Result<usize, RepositoryError> {
        let mut groups = self.groups.lock().unwrap();
        let records = groups.entry(group.clone()).or_default();
        records.extend(preferences);
        Ok(records.len())
    }

    async fn fetch_group(&self, group: &GroupId) -> Result<Vec<Preference>, RepositoryError> {
        Ok(self.records(group))
    }

    async fn clear_group(&self, group: &GroupId) -> Result<usize, RepositoryError> {
        Ok(self
            .groups
            .lock()
            .unwrap()
            .remove(group)
            .map(|records| records.len())
            .unwrap_or(0))
    }
}

// ==================== Gateway ====================

/// One scripted engine reply
pub enum Reply {
    Text(String),
    Fail(GatewayError),
    /// Never answers within any sane timeout
    Hang,
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_string())
    }
}

/// Gateway whose sessions answer from a shared script and record every prompt
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGateway {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

struct ScriptedSession {
    model: Model,
    gateway: ScriptedGateway,
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.gateway.prompts.lock().unwrap().push(content.to_string());
        let reply = self
            .gateway
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::Other("No more responses".to_string()))?;
        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Fail(e) => Err(e),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(GatewayError::Timeout)
            }
        }
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(ScriptedSession {
            model: model.clone(),
            gateway: self.clone(),
        }))
    }

    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        _system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.create_session(model).await
    }

    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(vec![Model::default()])
    }
}
