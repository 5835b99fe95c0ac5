use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{error::Result, shop::Shop, treatment::GeneratedContent};

/// Progress of a client through the wizard steps.
///
/// Ordered: a later step is only reachable once the session has at least
/// reached it, and handlers retreat to shop selection otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardState {
    /// No shop bound; only the shop list is reachable
    NoShop,
    /// A shop is bound; the input form may be shown
    ShopSelected,
    /// A message has been generated; the result page may be shown
    ContentGenerated,
}

/// Per-client wizard state, keyed by the token in the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub shop: Option<Shop>,
    pub content: Option<GeneratedContent>,
}

impl Session {
    pub fn new(id: String) -> Self {
        Self {
            id,
            shop: None,
            content: None,
        }
    }

    /// Derive the wizard step this session has reached.
    pub fn wizard_state(&self) -> WizardState {
        match (&self.shop, &self.content) {
            (None, _) => WizardState::NoShop,
            (Some(_), None) => WizardState::ShopSelected,
            (Some(_), Some(_)) => WizardState::ContentGenerated,
        }
    }

    /// Bind a shop, re-entering the workflow at the input step.
    ///
    /// Previously generated content is kept so the result page stays
    /// reachable after switching shops.
    pub fn select_shop(&mut self, shop: Shop) {
        self.shop = Some(shop);
    }

    /// Record the output of a generation run, replacing any previous one.
    pub fn store_content(&mut self, content: GeneratedContent) {
        self.content = Some(content);
    }
}

/// Trait for storing and retrieving sessions
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, session: Session) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Session>>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// In-memory implementation of SessionStorage
pub struct InMemorySessionStorage {
    sessions: Arc<DashMap<String, Session>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemorySessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn save(&self, session: Session) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }
}
