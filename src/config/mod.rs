use std::env;

const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-lite:generateContent";

#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream credential; generation is disabled when absent.
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Config {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.into()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}
