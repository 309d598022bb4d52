//! Cogency grader client: a single request to the chat back-end per window.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use vclip_models::score::GraderResult;

const PROMPT_TEMPLATE: &str = "You grade a 90-second transcript chunk for a short.\n\
Criteria: clear claim -> brief reason -> one example; minimal dangling pronouns; quote-worthiness.\n\
Output: { \"cogency\": 1-5, \"quotes\": [up to 3 concise sentences], \"salient_terms\": [up to 8 non-stopwords] }\n\
TEXT:\n<<<{text}>>>";

pub struct CogencyGrader {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl CogencyGrader {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: "meta-llama/Llama-3.1-8B-Instruct".to_string(),
            timeout,
        }
    }

    /// Health probe for `--health-check`.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));
        matches!(self.client.get(&url).timeout(self.timeout).send().await, Ok(resp) if resp.status().is_success())
    }

    /// Grade `text` for cogency. Never returns an error: a non-200 response,
    /// a timeout, or malformed JSON all substitute the degraded default.
    pub async fn grade(&self, text: &str) -> GraderResult {
        match self.grade_inner(text).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "cogency grader degraded");
                GraderResult::degraded_default()
            }
        }
    }

    async fn grade_inner(&self, text: &str) -> Result<GraderResult, String> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let prompt = PROMPT_TEMPLATE.replace("{text}", text);

        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: 0.1,
            max_tokens: 500,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("chat backend returned {}", response.status()));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| e.to_string())?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or("empty choices array")?;

        parse_grader_json(content)
    }
}

/// Parse the grader's embedded JSON payload, tolerating missing keys via
/// defaults and clamping `cogency` to `[1, 5]`.
fn parse_grader_json(content: &str) -> Result<GraderResult, String> {
    let value: Value = serde_json::from_str(content.trim()).map_err(|e| e.to_string())?;

    let cogency = value
        .get("cogency")
        .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse::<u64>().ok())))
        .unwrap_or(1)
        .clamp(1, 5) as u8;

    let quotes = value
        .get("quotes")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .take(3)
                .collect()
        })
        .unwrap_or_default();

    let salient_terms = value
        .get("salient_terms")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .take(8)
                .collect()
        })
        .unwrap_or_default();

    Ok(GraderResult {
        cogency,
        quotes,
        salient_terms,
        degraded: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_json() {
        let json = r#"{"cogency": 4, "quotes": ["a quote"], "salient_terms": ["term1", "term2"]}"#;
        let result = parse_grader_json(json).unwrap();
        assert_eq!(result.cogency, 4);
        assert_eq!(result.quotes, vec!["a quote".to_string()]);
        assert!(!result.degraded);
    }

    #[test]
    fn coerces_integer_shaped_string_cogency() {
        let json = r#"{"cogency": "4"}"#;
        let result = parse_grader_json(json).unwrap();
        assert_eq!(result.cogency, 4);
    }

    #[test]
    fn clamps_out_of_range_cogency() {
        let json = r#"{"cogency": 9}"#;
        let result = parse_grader_json(json).unwrap();
        assert_eq!(result.cogency, 5);
    }

    #[test]
    fn defaults_missing_keys() {
        let json = r#"{}"#;
        let result = parse_grader_json(json).unwrap();
        assert_eq!(result.cogency, 1);
        assert!(result.quotes.is_empty());
        assert!(result.salient_terms.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_grader_json("not json").is_err());
    }

    #[test]
    fn truncates_quotes_and_terms_to_caps() {
        let json = r#"{"quotes": ["1","2","3","4"], "salient_terms": ["a","b","c","d","e","f","g","h","i"]}"#;
        let result = parse_grader_json(json).unwrap();
        assert_eq!(result.quotes.len(), 3);
        assert_eq!(result.salient_terms.len(), 8);
    }
}
