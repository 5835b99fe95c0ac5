use uuid::Uuid;

/// Sentinel API key meaning "no credential configured". The generation
/// client runs in demo mode and never touches the network.
pub const PLACEHOLDER_API_KEY: &str = "key-placeholder";

const DEFAULT_API_URL: &str = "https://api.dify.ai/v1/chat-messages";
const DEFAULT_PORT: u16 = 5002;

/// Service configuration, read once from the environment at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `DIFY_API_KEY` — bearer credential for the generation API.
    /// Defaults to [`PLACEHOLDER_API_KEY`] (demo mode).
    pub dify_api_key: String,
    /// `DIFY_API_URL` — generation endpoint. Defaults to the hosted Dify
    /// chat-messages URL.
    pub dify_api_url: String,
    /// `SECRET_KEY` — session-cookie signing secret. Defaults to a random
    /// value regenerated each run; sessions live in memory, so a restart
    /// clears them regardless of pinning.
    pub session_secret: String,
    /// `PORT` — listening port. Defaults to 5002.
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            dify_api_key: std::env::var("DIFY_API_KEY")
                .unwrap_or_else(|_| PLACEHOLDER_API_KEY.to_string()),
            dify_api_url: std::env::var("DIFY_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            session_secret: std::env::var("SECRET_KEY")
                .unwrap_or_else(|_| Uuid::new_v4().simple().to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}
