use async_trait::async_trait;
use log::info;
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;
use std::time::Duration;

use super::{ Responder, SYSTEM_INSTRUCTION };

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiInstruction,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiResponder {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiResponder {
    /// `api_key` may be absent; the responder still constructs, and every
    /// `generate` call fails immediately so the caller's degraded-reply
    /// path takes over.
    pub fn new(
        api_key: Option<String>,
        model: String,
        base_url: String,
        timeout_secs: u64
    ) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, api_key, model, base_url })
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            api_key
        )
    }
}

#[async_trait]
impl Responder for GeminiResponder {
    async fn generate(&self, prompt: &str) -> Result<String, Box<dyn StdError + Send + Sync>> {
        let api_key = self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or("GEMINI_API_KEY is not configured")?;

        info!("GeminiResponder::generate() → model={}", self.model);

        let payload = GenerateRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart { text: prompt.to_string() }],
            }],
            system_instruction: GeminiInstruction {
                parts: vec![GeminiPart { text: SYSTEM_INSTRUCTION.to_string() }],
            },
        };

        let resp = self.client
            .post(self.endpoint(api_key))
            .json(&payload)
            .send().await?
            .error_for_status()?;

        let body: GenerateResponse = resp.json().await?;
        let text = body.candidates
            .first()
            .map(|c| {
                c.content.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err("Gemini returned an empty completion".into());
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generate_fails_without_api_key() {
        let responder = GeminiResponder::new(
            None,
            "gemini-2.5-flash".to_string(),
            "https://generativelanguage.googleapis.com".to_string(),
            30
        ).unwrap();

        let err = responder.generate("hello").await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn generate_treats_blank_api_key_as_missing() {
        let responder = GeminiResponder::new(
            Some(String::new()),
            "gemini-2.5-flash".to_string(),
            "https://generativelanguage.googleapis.com".to_string(),
            30
        ).unwrap();

        assert!(responder.generate("hello").await.is_err());
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let responder = GeminiResponder::new(
            Some("k".to_string()),
            "gemini-2.5-flash".to_string(),
            "https://example.test/".to_string(),
            30
        ).unwrap();

        assert_eq!(
            responder.endpoint("k"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent?key=k"
        );
    }

    #[test]
    fn empty_candidates_deserialize() {
        let body: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(body.candidates.is_empty());
    }
}
