pub mod client;
pub mod config;
pub mod error;
pub mod openai;
pub mod prompts;
pub mod provider;

pub use client::CompletionClient;
pub use config::CompletionConfig;
pub use error::{CompletionError, ProviderError};
pub use openai::OpenAiProvider;
pub use provider::{CompletionProvider, PromptMessage, PromptRole};
