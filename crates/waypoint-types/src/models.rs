use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when a conversation is created without one.
pub const DEFAULT_TITLE: &str = "새 대화";

/// Maximum number of characters taken from a message when deriving a title.
pub const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown message role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A named thread grouping an ordered sequence of messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One turn in a conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewConversation {
    pub title: String,
}

impl NewConversation {
    /// Blank titles fall back to [`DEFAULT_TITLE`]; long ones are clamped
    /// the same way [`derive_title`] clamps an opening message.
    pub fn new(title: Option<&str>) -> Self {
        let title = title
            .map(derive_title)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        Self { title }
    }
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub conversation_id: Uuid,
    pub role: Role,
    pub content: String,
}

/// Conversation title from the opening message: the first
/// [`TITLE_MAX_CHARS`] characters, with `...` appended when cut.
pub fn derive_title(content: &str) -> String {
    let content = content.trim();
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_is_used_verbatim() {
        assert_eq!(derive_title("  태국 교육봉사  "), "태국 교육봉사");
    }

    #[test]
    fn long_message_is_cut_on_char_boundary() {
        let msg = "가".repeat(60);
        let title = derive_title(&msg);
        assert_eq!(title, format!("{}...", "가".repeat(50)));
    }

    #[test]
    fn exactly_fifty_chars_has_no_ellipsis() {
        let msg = "a".repeat(50);
        assert_eq!(derive_title(&msg), msg);
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        assert_eq!(NewConversation::new(Some("   ")).title, DEFAULT_TITLE);
        assert_eq!(NewConversation::new(None).title, DEFAULT_TITLE);
        assert_eq!(NewConversation::new(Some("캄보디아")).title, "캄보디아");
    }

    #[test]
    fn long_title_is_clamped_once() {
        let derived = derive_title(&"나".repeat(80));
        assert_eq!(NewConversation::new(Some(&"나".repeat(80))).title, derived);
        assert_eq!(NewConversation::new(Some(&derived)).title, derived);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("system".parse::<Role>().is_err());
    }

    #[test]
    fn message_uses_camel_case_fields() {
        let msg = Message {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            role: Role::User,
            content: "hi".into(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("conversationId").is_some());
        assert_eq!(json["role"], "user");
    }
}
