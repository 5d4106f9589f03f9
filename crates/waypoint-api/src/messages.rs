use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use waypoint_types::api::MessagesQuery;
use waypoint_types::models::Message;

use crate::ApiError;
use crate::state::{AppState, blocking, parse_id, required};

/// GET /api/messages?conversationId=
///
/// An id that names no conversation yields an empty list, not a 404.
pub async fn list_messages(
    State(state): State<AppState>,
    query: Result<Query<MessagesQuery>, QueryRejection>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let Query(query) = query?;
    let raw = required(query.conversation_id)
        .ok_or_else(|| ApiError::Validation("conversationId가 필요합니다".into()))?;

    let Ok(conversation_id) = parse_id(&raw) else {
        return Ok(Json(Vec::new()));
    };

    let messages = blocking(&state, move |db| db.list_messages(&conversation_id)).await?;
    Ok(Json(messages))
}
