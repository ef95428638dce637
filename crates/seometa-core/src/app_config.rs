use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, resolved once at startup and passed explicitly to
/// the server and CLI.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Catalog store origin; the REST root is `{catalog_base_url}/rest/V1`.
    pub catalog_base_url: String,
    pub catalog_api_token: Option<String>,
    /// Generation-service credential. `None` disables the AI path.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub http_timeout_secs: u64,
    pub http_connect_timeout_secs: u64,
}

impl AppConfig {
    /// Returns `true` when a generation-service credential is configured.
    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("catalog_base_url", &self.catalog_base_url)
            .field(
                "catalog_api_token",
                &self.catalog_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("openai_temperature", &self.openai_temperature)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("http_connect_timeout_secs", &self.http_connect_timeout_secs)
            .finish()
    }
}
