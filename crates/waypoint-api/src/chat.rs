use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;
use waypoint_completion::PromptMessage;
use waypoint_types::api::{ChatRequest, ChatResponse};
use waypoint_types::models::{NewMessage, Role};

use crate::ApiError;
use crate::state::{AppState, blocking, parse_id, required};

/// POST /api/chat
///
/// Persists the user turn, asks the completion client for a reply over the
/// full transcript and persists that too. The steps are not atomic as a
/// whole: concurrent sends to one conversation may interleave.
pub async fn send_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;
    let (Some(raw_id), Some(content)) = (required(req.conversation_id), required(req.message)) else {
        return Err(ApiError::Validation("conversationId와 message가 필요합니다".into()));
    };
    let conversation_id = parse_id(&raw_id)?;

    // create_message fails with NotFound when the conversation is unknown
    let (message, history) = blocking(&state, move |db| {
        let message = db.create_message(NewMessage {
            conversation_id,
            role: Role::User,
            content,
        })?;
        let history = db.list_messages(&conversation_id)?;
        Ok((message, history))
    })
    .await?;

    let prompt: Vec<PromptMessage> = history.iter().map(PromptMessage::from).collect();
    let answer = state.completion.get_chat_completion(&prompt).await?;

    let reply = blocking(&state, move |db| {
        db.create_message(NewMessage {
            conversation_id,
            role: Role::Assistant,
            content: answer,
        })
    })
    .await?;

    info!("Conversation {}: exchanged turn ({} prior messages)", conversation_id, history.len().saturating_sub(1));

    Ok(Json(ChatResponse { message, reply }))
}
