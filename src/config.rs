use log::warn;

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Completion-endpoint configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl AiConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("STUDYMATE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            warn!("STUDYMATE_API_KEY not set - AI features will fall back to built-in content");
        }

        Self {
            endpoint: std::env::var("STUDYMATE_API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            model: std::env::var("STUDYMATE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}
