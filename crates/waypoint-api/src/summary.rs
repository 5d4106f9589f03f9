use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;
use waypoint_completion::PromptMessage;
use waypoint_types::api::{SummaryRequest, SummaryResponse};
use waypoint_types::models::Conversation;

use crate::ApiError;
use crate::state::{AppState, blocking, parse_id, required};

/// File name used when a conversation has no usable title.
pub const DEFAULT_SUMMARY_NAME: &str = "프로그램기획안";

/// POST /api/summary
pub async fn generate_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let Json(req) = payload?;
    let raw_id = required(req.conversation_id)
        .ok_or_else(|| ApiError::Validation("conversationId가 필요합니다".into()))?;

    let (_, summary) = summarize(&state, parse_id(&raw_id)?).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// GET /api/conversations/{id}/summary.txt
///
/// Same flow as [`generate_summary`], delivered as a plain-text attachment
/// named after the conversation.
pub async fn download_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (conversation, summary) = summarize(&state, parse_id(&id)?).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, content_disposition(&conversation.title)),
    ];
    Ok((headers, summary))
}

async fn summarize(state: &AppState, conversation_id: Uuid) -> Result<(Conversation, String), ApiError> {
    let (conversation, history) = blocking(state, move |db| {
        let conversation = db.get_conversation(&conversation_id)?;
        let history = db.list_messages(&conversation_id)?;
        Ok((conversation, history))
    })
    .await?;

    let conversation = conversation.ok_or(ApiError::NotFound)?;
    if history.is_empty() {
        return Err(ApiError::Validation("대화 내용이 없습니다".into()));
    }

    let prompt: Vec<PromptMessage> = history.iter().map(PromptMessage::from).collect();
    let summary = state.completion.generate_program_summary(&prompt).await?;

    info!("Conversation {}: summary generated from {} messages", conversation_id, history.len());
    Ok((conversation, summary))
}

/// `attachment` disposition carrying an ASCII fallback name plus the
/// UTF-8 title in RFC 5987 form.
fn content_disposition(title: &str) -> String {
    let name: String = title
        .trim()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | '"'))
        .collect();
    let name = if name.trim().is_empty() {
        DEFAULT_SUMMARY_NAME.to_string()
    } else {
        name
    };

    let ascii: String = name
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();

    format!(
        "attachment; filename=\"{}.txt\"; filename*=UTF-8''{}.txt",
        ascii,
        urlencoding::encode(&name)
    )
}
