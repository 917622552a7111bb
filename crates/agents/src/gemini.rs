use insure_core::{GenerationError, GenerationRequest};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::channel::GenerationBackend;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http_client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiBackend {
    pub fn new(http_client: Client, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

impl GenerationBackend for GeminiBackend {
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        let payload = json!({
            "system_instruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "contents": [
                { "role": "user", "parts": [{ "text": request.prompt }] }
            ]
        });

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Backend {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Malformed(err.to_string()))?;
        let text = extract_candidate_text(&body);
        text.ok_or(GenerationError::EmptyResponse)
    }
}

fn extract_candidate_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect::<String>();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
