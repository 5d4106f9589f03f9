use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use waypoint_types::api::HealthResponse;

use crate::state::AppState;
use crate::{chat, conversations, messages, suggestions, summary};

/// Every JSON route of the service. Static assets and middleware are layered
/// on by the binary.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/conversations",
            get(conversations::list_conversations).post(conversations::create_conversation),
        )
        .route(
            "/api/conversations/{id}",
            get(conversations::get_conversation).delete(conversations::delete_conversation),
        )
        .route("/api/conversations/{id}/summary.txt", get(summary::download_summary))
        .route("/api/messages", get(messages::list_messages))
        .route("/api/chat", post(chat::send_chat))
        .route("/api/summary", post(summary::generate_summary))
        .route("/api/suggested-prompts", get(suggestions::list_suggested_prompts))
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        completion_configured: state.completion.is_configured(),
    })
}
