use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{info, error};

use crate::models::EncodedImage;
use crate::prompt::GenerationConfig;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("no image data in response")]
    NoImage,
}

/// Seam between the wizard and the remote generation service. One call is
/// one exchange; the service is generative, so identical inputs may return
/// different images and no caching happens here.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns the generated photograph as a `data:{mime};base64,...` URI.
    async fn generate(
        &self,
        image: &EncodedImage,
        instruction: &str,
        config: &GenerationConfig,
    ) -> Result<String, GenerationError>;
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        let base_url = std::env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string());
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate(
        &self,
        image: &EncodedImage,
        instruction: &str,
        config: &GenerationConfig,
    ) -> Result<String, GenerationError> {
        let url = format!(
            "{}/models/gemini-2.5-flash-image:generateContent?key={}",
            self.base_url, self.api_key
        );

        info!("🔗 Making request to: {}", url.replace(&self.api_key, "***"));

        let request_body = json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": image.media_type,
                            "data": image.data,
                        }
                    },
                    { "text": instruction }
                ]
            }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
                "imageConfig": {
                    "aspectRatio": config.aspect_ratio.as_str(),
                },
                "candidateCount": 1
            }
        });

        let response = self.client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status();
        info!("📥 Response status: {}", status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ API Error response: {}", error_body);
            return Err(GenerationError::Http(format!("status={} body={}", status, error_body)));
        }

        let response_text = response.text().await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let parsed: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        let inline = extract_first_inline_image(&parsed).ok_or(GenerationError::NoImage)?;
        info!(
            "🖼️ Extracted {} image from API response: {}",
            inline.mime_type,
            preview(&inline.data)
        );

        Ok(format!("data:{};base64,{}", inline.mime_type, inline.data))
    }
}

/// Validates that `data` is decodable base64 and truncates it for logging.
fn preview(data: &str) -> String {
    if base64::engine::general_purpose::STANDARD.decode(data).is_err() {
        return "<not base64>".to_string();
    }
    if data.len() > 50 {
        format!("{}...[{} chars total]", &data[..50], data.len())
    } else {
        data.to_string()
    }
}

// --- Response Parsing Helpers ---

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate { #[serde(default)] content: Content }

#[derive(Debug, Deserialize, Default)]
struct Content { #[serde(default)] parts: Vec<Part> }

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData
    },
    Text { text: String },
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
}

fn extract_first_inline_image(resp: &GenerateContentResponse) -> Option<&InlineData> {
    for c in &resp.candidates {
        for p in &c.content.parts {
            match p {
                Part::Inline { inline_data } => return Some(inline_data),
                Part::Text { text } => tracing::debug!("text part alongside image: {}", text),
                Part::Other(_) => {}
            }
        }
    }
    info!("⚠️ No inline image data found in response structure");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_first_inline_part_past_leading_text() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your photograph." },
                        { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "c2Vjb25k" } }
                    ]
                }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let inline = extract_first_inline_image(&parsed).unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "Zmlyc3Q=");
    }

    #[test]
    fn text_only_response_yields_no_image() {
        let raw = r#"{
            "candidates": [{
                "content": { "parts": [ { "text": "cannot comply" } ] }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(extract_first_inline_image(&parsed).is_none());
    }

    #[test]
    fn empty_candidate_list_yields_no_image() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_first_inline_image(&parsed).is_none());
    }

    #[test]
    fn preview_truncates_long_payloads() {
        let data = "QUJD".repeat(100);
        let shown = preview(&data);
        assert!(shown.ends_with("[400 chars total]"));
        assert!(shown.len() < data.len());
        assert_eq!(preview("QUJD"), "QUJD");
    }
}
