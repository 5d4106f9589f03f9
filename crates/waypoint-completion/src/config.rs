use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-5";
pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 8192;
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_completion_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

impl CompletionConfig {
    /// `None` when no API key is set; the service then runs unconfigured.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("AI_INTEGRATIONS_OPENAI_API_KEY").or_else(|| non_blank("OPENAI_API_KEY"))?;

        let base_url = non_blank("AI_INTEGRATIONS_OPENAI_BASE_URL")
            .or_else(|| non_blank("OPENAI_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Some(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: non_blank("WAYPOINT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_completion_tokens: parsed(&non_blank, "WAYPOINT_MAX_COMPLETION_TOKENS", DEFAULT_MAX_COMPLETION_TOKENS),
            temperature: parsed(&non_blank, "WAYPOINT_TEMPERATURE", DEFAULT_TEMPERATURE),
            timeout: Duration::from_secs(parsed(&non_blank, "WAYPOINT_COMPLETION_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
        })
    }
}

fn parsed<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}='{}'", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Option<CompletionConfig> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        CompletionConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn missing_key_means_unconfigured() {
        assert!(config(&[]).is_none());
        assert!(config(&[("OPENAI_API_KEY", "  ")]).is_none());
    }

    #[test]
    fn integration_key_takes_precedence() {
        let cfg = config(&[
            ("OPENAI_API_KEY", "plain"),
            ("AI_INTEGRATIONS_OPENAI_API_KEY", "integration"),
            ("AI_INTEGRATIONS_OPENAI_BASE_URL", "http://localhost:9000/v1/"),
        ])
        .unwrap();
        assert_eq!(cfg.api_key, "integration");
        assert_eq!(cfg.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn defaults_apply() {
        let cfg = config(&[("OPENAI_API_KEY", "k"), ("WAYPOINT_TEMPERATURE", "warm")]).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.max_completion_tokens, DEFAULT_MAX_COMPLETION_TOKENS);
        assert_eq!(cfg.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
