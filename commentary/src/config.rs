use std::time::Duration;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const UPSTREAM_URL_VAR: &str = "DEGEN_UPSTREAM_URL";
pub const MODEL_VAR: &str = "DEGEN_COMMENTARY_MODEL";
pub const REFERER_VAR: &str = "DEGEN_COMMENTARY_REFERER";
pub const TITLE_VAR: &str = "DEGEN_COMMENTARY_TITLE";

pub const DEFAULT_UPSTREAM_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mixtral-8x7b";
pub const DEFAULT_REFERER: &str = "https://minesweeper-game.vercel.app";
pub const DEFAULT_TITLE: &str = "Minesweeper Game";
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the commentary proxy, normally read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub api_key: Option<String>,
    pub upstream_url: String,
    pub model: String,
    pub referer: String,
    pub title: String,
    pub timeout: Duration,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source, blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        Self {
            api_key: var(API_KEY_VAR),
            upstream_url: var(UPSTREAM_URL_VAR).unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_owned()),
            model: var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            referer: var(REFERER_VAR).unwrap_or_else(|| DEFAULT_REFERER.to_owned()),
            title: var(TITLE_VAR).unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

// keeps the key out of logs
impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("upstream_url", &self.upstream_url)
            .field("model", &self.model)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .field("timeout", &self.timeout)
            .finish()
    }
}
