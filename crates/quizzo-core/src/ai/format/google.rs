//! Google/Gemini API format handler
//!
//! Handles the generateContent format (contents, parts, generationConfig).

use serde_json::Value;

use super::{response, FormatHandler, RequestOptions};
use crate::ai::client::config::Credentials;

/// Google format handler
pub struct GoogleFormat {
    endpoint_template: String,
}

impl GoogleFormat {
    pub fn new() -> Self {
        Self {
            endpoint_template: "/v1beta/models/{}:generateContent".to_string(),
        }
    }
}

impl Default for GoogleFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatHandler for GoogleFormat {
    fn build_request_body(&self, _model: &str, prompt: &str, options: &RequestOptions) -> Value {
        serde_json::json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "maxOutputTokens": options.max_tokens,
                "temperature": options.temperature,
            }
        })
    }

    /// The model travels in the path rather than the body
    fn endpoint_url(&self, base_url: &str, credentials: &Credentials) -> Option<String> {
        let path = self
            .endpoint_template
            .replace("{}", &credentials.model_name);
        Some(format!("{}{}", base_url, path))
    }

    fn extract_text<'a>(&self, response: &'a Value) -> Option<&'a str> {
        response::google_text(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_body() {
        let body = GoogleFormat::new().build_request_body(
            "gemini-1.5-flash",
            "quiz me",
            &RequestOptions::default(),
        );

        assert_eq!(body["contents"][0]["parts"][0]["text"], "quiz me");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
        assert!(body["generationConfig"]["temperature"].is_number());
        assert!(body.get("model").is_none());
    }

    #[test]
    fn test_google_endpoint_embeds_model() {
        let creds = Credentials::new("k", "gemini-1.5-flash");
        assert_eq!(
            GoogleFormat::new()
                .endpoint_url("https://generativelanguage.googleapis.com", &creds)
                .unwrap(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
