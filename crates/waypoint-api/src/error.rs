use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};
use waypoint_completion::CompletionError;
use waypoint_db::StoreError;
use waypoint_types::api::ErrorBody;

pub const NOT_FOUND_MESSAGE: &str = "대화를 찾을 수 없습니다";
pub const INTERNAL_MESSAGE: &str = "요청을 처리하는 중 오류가 발생했습니다";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("storage error: {0}")]
    Store(StoreError),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Completion(_) | Self::Store(_) | Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text returned to the caller. Storage and runtime detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Store(_) | Self::Join(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                Self::Completion(CompletionError::Chat(source) | CompletionError::Summary(source)) => {
                    error!("{}: {}", self, source)
                }
                other => error!("Request failed: {}", other),
            }
        } else {
            warn!("Rejected request ({}): {}", status, self);
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
