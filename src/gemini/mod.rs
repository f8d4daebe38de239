use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::routes::generate::model::{
    AiResponseParams, ChatMessage, MessagesParams, PostContent, PostParams,
};

mod parse;

/// Reply used when the model returns an empty text field for an AI-response
/// request.
const FALLBACK_REPLY: &str = "I'm here to help!";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Thin client over the Gemini `generateContent` endpoint. One upstream round
/// trip per call; no retries.
pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            http,
            api_url,
            api_key,
        }
    }

    pub async fn generate_messages(
        &self,
        params: &MessagesParams,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let prompt = format!(
            "Generate a realistic {} chat conversation.\n\
             Context: {}\n\
             Tone: {}\n\
             Number of messages: {}\n\
             Language: {}\n\n\
             Return ONLY a JSON array with this format (no markdown, no explanation):\n\
             [\n\
             \x20 {{\"senderId\": \"me\", \"content\": \"message text\"}},\n\
             \x20 {{\"senderId\": \"other\", \"content\": \"reply text\"}}\n\
             ]\n\n\
             Make it natural and realistic. Alternate between \"me\" and \"other\" senders.",
            params.platform,
            params.context,
            params.tone.as_str(),
            params.message_count,
            params.language.full_name(),
        );

        let text = self
            .generate_text(prompt, 0.8, 1024)
            .await?
            .ok_or(AppError::EmptyUpstreamResponse)?;
        parse::extract_json_array(&text)
    }

    pub async fn generate_post(&self, params: &PostParams) -> Result<PostContent, AppError> {
        let prompt = format!(
            "Generate a {} post.\n\
             Topic: {}\n\
             Style: {}\n\
             Include hashtags: {}\n\
             Language: {}\n\n\
             Return ONLY a JSON object with this format (no markdown, no explanation):\n\
             {{\n\
             \x20 \"content\": \"post text here\",\n\
             \x20 \"hashtags\": [\"tag1\", \"tag2\"] // only if includeHashtags is true\n\
             }}\n\n\
             Make it engaging and platform-appropriate.",
            params.platform,
            params.topic,
            params.style.as_str(),
            params.include_hashtags,
            params.language.full_name(),
        );

        let text = self
            .generate_text(prompt, 0.8, 512)
            .await?
            .ok_or(AppError::EmptyUpstreamResponse)?;
        parse::extract_json_object(&text)
    }

    pub async fn generate_ai_response(
        &self,
        params: &AiResponseParams,
    ) -> Result<String, AppError> {
        let persona = params.platform.persona();
        let prompt = format!(
            "You are simulating {persona}.\n\
             User message: \"{}\"\n\n\
             Generate a helpful, natural response as if you were {persona}.\n\
             Keep it concise (2-3 sentences max).\n\
             Return ONLY the response text, no quotes or formatting.",
            params.message,
        );

        let text = self.generate_text(prompt, 0.7, 256).await?;
        Ok(text.unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }

    /// Single round trip to the upstream service. Returns `None` when the
    /// response envelope carries no non-empty text fragment.
    async fn generate_text(
        &self,
        prompt: String,
        temperature: f32,
        max_output_tokens: u32,
    ) -> Result<Option<String>, AppError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
            },
        };

        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(status.as_u16()));
        }

        let data: GenerateContentResponse = response.json().await?;
        let text = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty());

        Ok(text)
    }
}
