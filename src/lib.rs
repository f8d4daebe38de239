use config::Config;

pub mod config;
pub mod error;
pub mod gemini;
pub mod middleware;
pub mod router;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}
