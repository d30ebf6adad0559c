use crate::llm::{RewriteError, TextRewriteService};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct GeminiRewriter {
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl GeminiRewriter {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self, RewriteError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("directions/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RewriteError::HttpClient(e.to_string()))?;

        Ok(Self {
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn build_request(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    }
}

/// Concatenated text of the first candidate, trimmed.
fn extract_text(response: GenerateResponse) -> Result<String, RewriteError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(RewriteError::EmptyResult);
    }
    Ok(text.to_string())
}

impl TextRewriteService for GeminiRewriter {
    fn rewrite(&self, prompt: &str) -> Result<String, RewriteError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        log::debug!("POST {} ({} prompt chars)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&build_request(prompt))
            .send()
            .map_err(|e| RewriteError::Request(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RewriteError::Api(format!("{}: {}", status, error_text)));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| RewriteError::InvalidResponse(e.without_url().to_string()))?;

        extract_text(body)
    }

    fn backend_name(&self) -> &str {
        "Google Gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(build_request("Say hi")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "contents": [{ "parts": [{ "text": "Say hi" }] }] })
        );
    }

    #[test]
    fn extracts_first_candidate_text() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"  Turn left at "},{"text":"the bakery\n"}],"role":"model"},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Turn left at the bakery");
    }

    #[test]
    fn blocked_or_empty_answers_are_errors() {
        let no_candidates: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(matches!(extract_text(no_candidates), Err(RewriteError::EmptyResult)));

        let blank: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#)
                .unwrap();
        assert!(matches!(extract_text(blank), Err(RewriteError::EmptyResult)));

        let no_content: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(matches!(extract_text(no_content), Err(RewriteError::EmptyResult)));
    }

    #[test]
    fn default_model() {
        let rewriter = GeminiRewriter::new("key".to_string(), None).unwrap();
        assert_eq!(rewriter.model(), DEFAULT_MODEL);
        let rewriter = GeminiRewriter::new("key".to_string(), Some("gemini-2.0-flash".into())).unwrap();
        assert_eq!(rewriter.model(), "gemini-2.0-flash");
    }
}
