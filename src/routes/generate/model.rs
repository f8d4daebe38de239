use serde::{Deserialize, Serialize};

/// Inbound generation request. The `type` discriminator selects the variant,
/// so dispatch over the three kinds is exhaustive at compile time.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GenerationRequest {
    #[serde(rename = "messages")]
    Messages(MessagesParams),
    #[serde(rename = "post")]
    Post(PostParams),
    #[serde(rename = "ai-response")]
    AiResponse(AiResponseParams),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesParams {
    pub platform: String,
    pub context: String,
    pub tone: Tone,
    pub message_count: u32,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostParams {
    pub platform: String,
    pub topic: String,
    pub style: PostStyle,
    pub include_hashtags: bool,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct AiResponseParams {
    pub message: String,
    pub platform: AssistantPlatform,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    Professional,
    Funny,
    Romantic,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Funny => "funny",
            Tone::Romantic => "romantic",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStyle {
    Informative,
    Engaging,
    Promotional,
}

impl PostStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStyle::Informative => "informative",
            PostStyle::Engaging => "engaging",
            PostStyle::Promotional => "promotional",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Tr,
    En,
}

impl Language {
    pub fn full_name(self) -> &'static str {
        match self {
            Language::Tr => "Turkish",
            Language::En => "English",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantPlatform {
    Chatgpt,
    Claude,
}

impl AssistantPlatform {
    /// Persona name used in the role-play prompt.
    pub fn persona(self) -> &'static str {
        match self {
            AssistantPlatform::Chatgpt => "ChatGPT",
            AssistantPlatform::Claude => "Claude",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender_id: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostContent {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
}

/// Result union mirroring the request kind.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Messages(Vec<ChatMessage>),
    Post(PostContent),
    Text(String),
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub result: GenerationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_kinds_deserialize_from_the_wire_shape() {
        let req: GenerationRequest = serde_json::from_value(serde_json::json!({
            "type": "messages",
            "platform": "whatsapp",
            "context": "weekend plans",
            "tone": "casual",
            "messageCount": 6,
            "language": "en",
        }))
        .unwrap();
        assert!(matches!(req, GenerationRequest::Messages(_)));

        let req: GenerationRequest = serde_json::from_value(serde_json::json!({
            "type": "ai-response",
            "message": "What is Rust?",
            "platform": "claude",
        }))
        .unwrap();
        assert!(matches!(req, GenerationRequest::AiResponse(_)));
    }

    #[test]
    fn unknown_type_discriminator_is_rejected() {
        let result: Result<GenerationRequest, _> = serde_json::from_value(serde_json::json!({
            "type": "haiku",
            "platform": "whatsapp",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn post_result_omits_hashtags_when_absent() {
        let json = serde_json::to_value(GenerationResult::Post(PostContent {
            content: "hello".into(),
            hashtags: None,
        }))
        .unwrap();
        assert_eq!(json, serde_json::json!({"content": "hello"}));
    }
}
