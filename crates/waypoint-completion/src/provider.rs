use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use waypoint_types::models::{Message, Role};

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

impl From<&Message> for PromptMessage {
    fn from(msg: &Message) -> Self {
        let role = match msg.role {
            Role::User => PromptRole::User,
            Role::Assistant => PromptRole::Assistant,
        };
        Self {
            role,
            content: msg.content.clone(),
        }
    }
}

/// An external chat-completion service.
///
/// `Ok(None)` means the provider answered but produced no text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<Option<String>, ProviderError>;
}
