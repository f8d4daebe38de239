use axum::{Json, extract::State};

use super::model::{GenerateResponse, GenerationRequest, GenerationResult};
use crate::AppState;
use crate::error::AppError;
use crate::gemini::GeminiClient;

/// Generation gateway. The rate limit gate runs before this handler as a
/// middleware layer; here the order is credential check, request parse, then a
/// single upstream round trip for the selected kind. The body is taken as a
/// raw string so the parse gate runs after the credential gate and every
/// rejection goes through the fixed error bodies.
#[axum::debug_handler]
pub async fn generate(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<GenerateResponse>, AppError> {
    let api_key = state
        .config
        .gemini_api_key
        .clone()
        .ok_or(AppError::NotConfigured)?;

    let request: GenerationRequest =
        serde_json::from_str(&body).map_err(|_| AppError::InvalidRequest)?;

    let client = GeminiClient::new(state.http.clone(), state.config.gemini_api_url.clone(), api_key);

    let result = match request {
        GenerationRequest::Messages(params) => {
            GenerationResult::Messages(client.generate_messages(&params).await?)
        }
        GenerationRequest::Post(params) => {
            GenerationResult::Post(client.generate_post(&params).await?)
        }
        GenerationRequest::AiResponse(params) => {
            GenerationResult::Text(client.generate_ai_response(&params).await?)
        }
    };

    Ok(Json(GenerateResponse { result }))
}
