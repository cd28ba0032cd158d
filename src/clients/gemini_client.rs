use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{PlannerError, Result};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-001";

const MAX_OUTPUT_TOKENS: u32 = 8192;
const TEMPERATURE: f32 = 0.7;
const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const BLOCK_THRESHOLD: &str = "BLOCK_LOW_AND_ABOVE";

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn build_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            max_output_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        },
        safety_settings: HARM_CATEGORIES
            .into_iter()
            .map(|category| SafetySetting {
                category,
                threshold: BLOCK_THRESHOLD,
            })
            .collect(),
    }
}

pub async fn generate_content(
    http: &reqwest::Client,
    base_url: &str,
    model: &str,
    api_key: &str,
    prompt: &str,
) -> Result<String> {
    let url = format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model);
    debug!("Requesting schedule from {}", model);

    let response = http
        .post(&url)
        .query(&[("key", api_key)])
        .json(&build_request(prompt))
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        error!("Gemini request failed: {} - {}", status, text);
        return Err(PlannerError::Generation(format!(
            "Request failed with status {}: {}",
            status, text
        )));
    }

    extract_text(&text)
}

fn extract_text(body: &str) -> Result<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        PlannerError::Generation(format!("Failed to parse response: {}\nRaw body: {}", e, body))
    })?;

    let content = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .ok_or_else(|| {
            PlannerError::Generation(format!("No candidates in response.\nRaw body: {}", body))
        })?;

    Ok(content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect::<Vec<_>>()
        .concat())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_generation_and_safety_settings() {
        let body = serde_json::to_value(build_request("hello")).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(body["safetySettings"][0]["threshold"], "BLOCK_LOW_AND_ABOVE");
    }

    #[test]
    fn joins_parts_of_first_candidate() {
        let body = r#"{"candidates": [
            {"content": {"parts": [{"text": "**07:00-08:00 朝食**\n"}, {"text": "**08:00-09:00 移動**"}], "role": "model"}},
            {"content": {"parts": [{"text": "ignored"}]}}
        ]}"#;
        assert_eq!(
            extract_text(body).unwrap(),
            "**07:00-08:00 朝食**\n**08:00-09:00 移動**"
        );
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert!(matches!(extract_text(body), Err(PlannerError::Generation(_))));
    }
}
