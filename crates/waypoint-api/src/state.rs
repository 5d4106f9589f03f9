use std::sync::Arc;

use uuid::Uuid;
use waypoint_completion::CompletionClient;
use waypoint_db::{Database, StoreError};

use crate::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub completion: CompletionClient,
}

impl AppStateInner {
    pub fn new(db: Database, completion: CompletionClient) -> AppState {
        Arc::new(Self { db, completion })
    }
}

/// Run a storage call off the async runtime.
pub(crate) async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    let result = tokio::task::spawn_blocking(move || f(&state.db)).await?;
    Ok(result?)
}

/// Ids that are not UUIDs cannot name a stored record.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::NotFound)
}

/// `Some` only for values that are present and not blank.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
