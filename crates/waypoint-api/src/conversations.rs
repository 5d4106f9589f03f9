use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;
use waypoint_types::api::CreateConversationRequest;
use waypoint_types::models::{Conversation, NewConversation};

use crate::ApiError;
use crate::state::{AppState, blocking, parse_id};

/// GET /api/conversations
pub async fn list_conversations(State(state): State<AppState>) -> Result<Json<Vec<Conversation>>, ApiError> {
    let conversations = blocking(&state, |db| db.list_conversations()).await?;
    Ok(Json(conversations))
}

/// GET /api/conversations/{id}
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Conversation>, ApiError> {
    let id = parse_id(&id)?;
    let conversation = blocking(&state, move |db| db.get_conversation(&id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(conversation))
}

/// POST /api/conversations
pub async fn create_conversation(
    State(state): State<AppState>,
    payload: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let new = NewConversation::new(req.title.as_deref());

    let conversation = blocking(&state, move |db| db.create_conversation(new)).await?;
    info!("Conversation {} created", conversation.id);

    Ok((StatusCode::CREATED, Json(conversation)))
}

/// DELETE /api/conversations/{id}
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let deleted = blocking(&state, move |db| db.delete_conversation(&id)).await?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    info!("Conversation {} deleted", id);
    Ok(StatusCode::NO_CONTENT)
}
