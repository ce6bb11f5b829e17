//! Response text extraction
//!
//! Each provider nests its first text completion at a different path. When the
//! expected path is missing, every known path is tried in turn so that
//! OpenAI-compatible proxies fronting other vendors still work.

use serde_json::Value;
use tracing::warn;

use super::FormatHandler;
use crate::ai::providers::ProviderId;

/// `choices[0].message.content`
pub fn openai_text(response: &Value) -> Option<&str> {
    response
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|t| t.as_str())
}

/// `content[0].text`
pub fn anthropic_text(response: &Value) -> Option<&str> {
    response
        .get("content")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|block| block.get("text"))
        .and_then(|t| t.as_str())
}

/// `candidates[0].content.parts[0].text`
pub fn google_text(response: &Value) -> Option<&str> {
    response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .and_then(|arr| arr.first())
        .and_then(|part| part.get("text"))
        .and_then(|t| t.as_str())
}

/// Every known extraction path, in fallback order
const EXTRACTORS: &[fn(&Value) -> Option<&str>] = &[openai_text, anthropic_text, google_text];

/// Extract the first text completion, falling back across all known shapes
pub fn extract_completion_text<'a>(
    provider: ProviderId,
    handler: &dyn FormatHandler,
    response: &'a Value,
) -> Option<&'a str> {
    if let Some(text) = handler.extract_text(response) {
        return Some(text);
    }

    let text = EXTRACTORS.iter().find_map(|extract| extract(response));
    if text.is_some() {
        warn!(
            "{} response did not match its own format, used fallback extraction",
            provider
        );
    }
    text
}

/// Pull a human-readable message out of a provider error payload
///
/// OpenAI, Azure, Anthropic, and Google all nest it at `error.message`.
/// Falls back to the raw body when it is not JSON or has no such field.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|json| json.get("error"))
        .and_then(|err| err.get("message").or(Some(err)))
        .and_then(|msg| msg.as_str())
        .map(String::from)
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::format::get_format_handler;
    use serde_json::json;

    fn openai_payload() -> Value {
        json!({
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "1. Cats"},
                "finish_reason": "stop"
            }]
        })
    }

    fn anthropic_payload() -> Value {
        json!({
            "id": "msg_01",
            "type": "message",
            "content": [{"type": "text", "text": "Question 1: Why?"}],
            "stop_reason": "end_turn"
        })
    }

    fn google_payload() -> Value {
        json!({
            "candidates": [{
                "content": {"parts": [{"text": "- Bees"}], "role": "model"},
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn test_provider_paths() {
        assert_eq!(openai_text(&openai_payload()), Some("1. Cats"));
        assert_eq!(anthropic_text(&anthropic_payload()), Some("Question 1: Why?"));
        assert_eq!(google_text(&google_payload()), Some("- Bees"));

        assert_eq!(openai_text(&google_payload()), None);
        assert_eq!(google_text(&anthropic_payload()), None);
    }

    #[test]
    fn test_primary_path_per_provider() {
        for (provider, payload, expected) in [
            (ProviderId::OpenAI, openai_payload(), "1. Cats"),
            (ProviderId::AzureOpenAI, openai_payload(), "1. Cats"),
            (ProviderId::Anthropic, anthropic_payload(), "Question 1: Why?"),
            (ProviderId::Google, google_payload(), "- Bees"),
        ] {
            let handler = get_format_handler(provider);
            assert_eq!(
                extract_completion_text(provider, handler.as_ref(), &payload),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_fallback_to_other_shapes() {
        // An "OpenAI" endpoint that actually speaks the Anthropic format
        let handler = get_format_handler(ProviderId::OpenAI);
        assert_eq!(
            extract_completion_text(ProviderId::OpenAI, handler.as_ref(), &anthropic_payload()),
            Some("Question 1: Why?")
        );

        let handler = get_format_handler(ProviderId::Anthropic);
        assert_eq!(
            extract_completion_text(ProviderId::Anthropic, handler.as_ref(), &google_payload()),
            Some("- Bees")
        );
    }

    #[test]
    fn test_no_text_anywhere() {
        let handler = get_format_handler(ProviderId::Google);
        let payload = json!({"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}});
        assert_eq!(
            extract_completion_text(ProviderId::Google, handler.as_ref(), &payload),
            None
        );

        // content present but null
        let payload = json!({"choices": [{"message": {"content": null}}]});
        assert_eq!(
            extract_completion_text(ProviderId::OpenAI, handler.as_ref(), &payload),
            None
        );
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Incorrect API key provided");

        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert_eq!(error_message(body), "invalid x-api-key");

        assert_eq!(error_message(r#"{"error":"Bad gateway"}"#), "Bad gateway");
        assert_eq!(error_message("  upstream timeout\n"), "upstream timeout");
    }
}
