pub mod chat;
pub mod conversations;
pub mod error;
pub mod messages;
pub mod router;
pub mod state;
pub mod suggestions;
pub mod summary;

pub use error::ApiError;
pub use router::api_router;
pub use state::{AppState, AppStateInner};
