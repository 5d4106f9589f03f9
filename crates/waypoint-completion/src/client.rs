use std::sync::Arc;

use tracing::{error, info};

use crate::config::CompletionConfig;
use crate::openai::OpenAiProvider;
use crate::prompts::{CHAT_FALLBACK, SUMMARY_FALLBACK, SYSTEM_PROMPT, summary_instruction};
use crate::provider::{CompletionProvider, PromptMessage};
use crate::{CompletionError, ProviderError};

/// The two completion operations the service needs, wrapped around an
/// optional provider. Built once at startup and shared by all handlers.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Every call fails with [`CompletionError::Unconfigured`].
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    pub fn from_config(config: Option<&CompletionConfig>) -> Result<Self, ProviderError> {
        match config {
            Some(config) => {
                let provider = OpenAiProvider::new(config)?;
                info!("Completion provider configured: {} (model {})", config.base_url, provider.model());
                Ok(Self::new(Arc::new(provider)))
            }
            None => Ok(Self::unconfigured()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Next assistant turn for the given transcript.
    pub async fn get_chat_completion(&self, history: &[PromptMessage]) -> Result<String, CompletionError> {
        let provider = self.provider.as_ref().ok_or(CompletionError::Unconfigured)?;

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(PromptMessage::system(SYSTEM_PROMPT));
        messages.extend_from_slice(history);

        match provider.complete(&messages).await {
            Ok(text) => Ok(text.unwrap_or_else(|| CHAT_FALLBACK.to_string())),
            Err(e) => {
                error!("Chat completion failed: {}", e);
                Err(CompletionError::Chat(e))
            }
        }
    }

    /// Structured planning document covering the conversation so far.
    pub async fn generate_program_summary(&self, history: &[PromptMessage]) -> Result<String, CompletionError> {
        let provider = self.provider.as_ref().ok_or(CompletionError::Unconfigured)?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(PromptMessage::system(SYSTEM_PROMPT));
        messages.extend_from_slice(history);
        messages.push(PromptMessage::user(summary_instruction()));

        match provider.complete(&messages).await {
            Ok(text) => Ok(text.unwrap_or_else(|| SUMMARY_FALLBACK.to_string())),
            Err(e) => {
                error!("Summary completion failed: {}", e);
                Err(CompletionError::Summary(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::provider::PromptRole;

    /// Records every request and answers with a fixed result.
    struct Recording {
        answer: Option<String>,
        fail: bool,
        seen: Mutex<Vec<Vec<PromptMessage>>>,
    }

    impl Recording {
        fn answering(answer: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.map(String::from),
                fail: false,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: None,
                fail: true,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last(&self) -> Vec<PromptMessage> {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl CompletionProvider for Recording {
        async fn complete(&self, messages: &[PromptMessage]) -> Result<Option<String>, ProviderError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            if self.fail {
                return Err(ProviderError::InvalidResponse("boom".into()));
            }
            Ok(self.answer.clone())
        }
    }

    fn history() -> Vec<PromptMessage> {
        vec![
            PromptMessage::user("베트남에서 2주 봉사를 계획 중이에요"),
            PromptMessage {
                role: PromptRole::Assistant,
                content: "좋아요! 팀 규모는요?".into(),
            },
            PromptMessage::user("6명입니다"),
        ]
    }

    #[tokio::test]
    async fn chat_prepends_system_prompt() {
        let provider = Recording::answering(Some("안녕하세요"));
        let client = CompletionClient::new(provider.clone());

        let reply = client.get_chat_completion(&history()).await.unwrap();
        assert_eq!(reply, "안녕하세요");

        let sent = provider.last();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0], PromptMessage::system(SYSTEM_PROMPT));
        assert_eq!(&sent[1..], history().as_slice());
    }

    #[tokio::test]
    async fn summary_appends_instruction_last() {
        let provider = Recording::answering(Some("기획안"));
        let client = CompletionClient::new(provider.clone());

        client.generate_program_summary(&history()).await.unwrap();

        let sent = provider.last();
        assert_eq!(sent.len(), 5);
        assert_eq!(sent[0].role, PromptRole::System);
        assert_eq!(sent[4], PromptMessage::user(summary_instruction()));
    }

    #[tokio::test]
    async fn empty_answers_use_fallback_text() {
        let client = CompletionClient::new(Recording::answering(None));
        assert_eq!(client.get_chat_completion(&history()).await.unwrap(), CHAT_FALLBACK);
        assert_eq!(client.generate_program_summary(&history()).await.unwrap(), SUMMARY_FALLBACK);
    }

    #[tokio::test]
    async fn unconfigured_client_refuses() {
        let client = CompletionClient::unconfigured();
        assert!(!client.is_configured());
        assert!(matches!(
            client.get_chat_completion(&history()).await,
            Err(CompletionError::Unconfigured)
        ));
        assert!(matches!(
            client.generate_program_summary(&history()).await,
            Err(CompletionError::Unconfigured)
        ));
    }

    #[tokio::test]
    async fn provider_failure_is_reported_generically() {
        let client = CompletionClient::new(Recording::failing());

        let err = client.get_chat_completion(&history()).await.unwrap_err();
        assert_eq!(err.to_string(), "AI 응답 생성 중 오류가 발생했습니다.");

        let err = client.generate_program_summary(&history()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Summary(ProviderError::InvalidResponse(_))));
    }
}
