use anyhow::{Context, Result};

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Application configuration loaded from environment variables.
/// Everything has a default; the studio starts with an empty environment.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub groq_api_url: String,
    pub groq_model: String,
    /// Optional key to seed the session's key store with.
    pub groq_api_key: Option<String>,
    pub chrome_bin: String,
    pub capture_viewport_height: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "5173")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            groq_api_url: env_or("GROQ_API_URL", DEFAULT_GROQ_API_URL),
            groq_model: env_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            groq_api_key: std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            chrome_bin: env_or("CHROME_BIN", "chromium"),
            capture_viewport_height: env_or("CAPTURE_VIEWPORT_HEIGHT", "4000")
                .parse::<u32>()
                .context("CAPTURE_VIEWPORT_HEIGHT must be a positive integer")?,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("groq_api_url", &self.groq_api_url)
            .field("groq_model", &self.groq_model)
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<redacted>"))
            .field("chrome_bin", &self.chrome_bin)
            .field("capture_viewport_height", &self.capture_viewport_height)
            .finish()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
