/// Failure talking to the completion provider itself.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// What callers of [`crate::CompletionClient`] see. Provider detail is kept
/// as the error source; the display text is safe to show to end users.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("OpenAI API가 설정되지 않았습니다. OPENAI_API_KEY 환경 변수를 설정해주세요.")]
    Unconfigured,

    #[error("AI 응답 생성 중 오류가 발생했습니다.")]
    Chat(#[source] ProviderError),

    #[error("프로그램 요약 생성 중 오류가 발생했습니다.")]
    Summary(#[source] ProviderError),
}
