//! Database row types. These map directly to SQLite rows and are converted
//! into `waypoint-types` records at the crate boundary.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use uuid::Uuid;
use waypoint_types::models::{Conversation, Message};

use crate::StoreError;

pub struct ConversationRow {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub conversation_id: String,
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

/// Current time at the precision timestamps are stored with, so a record
/// returned from an insert equals the one read back later.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamps are stored as RFC 3339 with microseconds so that they sort
/// lexically in creation order.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str, field: &str, id: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("{} '{}' on row '{}': {}", field, raw, id, e)))
}

fn parse_id(raw: &str, field: &str) -> Result<Uuid, StoreError> {
    raw.parse()
        .map_err(|e| StoreError::Corrupt(format!("{} '{}': {}", field, raw, e)))
}

impl TryFrom<ConversationRow> for Conversation {
    type Error = StoreError;

    fn try_from(row: ConversationRow) -> Result<Self, Self::Error> {
        Ok(Conversation {
            id: parse_id(&row.id, "conversation id")?,
            created_at: parse_timestamp(&row.created_at, "created_at", &row.id)?,
            updated_at: parse_timestamp(&row.updated_at, "updated_at", &row.id)?,
            title: row.title,
        })
    }
}

impl TryFrom<MessageRow> for Message {
    type Error = StoreError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            id: parse_id(&row.id, "message id")?,
            conversation_id: parse_id(&row.conversation_id, "conversation_id")?,
            role: row
                .role
                .parse()
                .map_err(|e| StoreError::Corrupt(format!("message '{}': {}", row.id, e)))?,
            timestamp: parse_timestamp(&row.timestamp, "timestamp", &row.id)?,
            content: row.content,
        })
    }
}
