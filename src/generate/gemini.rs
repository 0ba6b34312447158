use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{Value, json};

use super::{Attempt, GenerateError, Transport};

pub struct GeminiTransport {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    system_instruction: String,
}

impl GeminiTransport {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        system_instruction: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerateError::Request(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            system_instruction: system_instruction.into(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn payload(&self, prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "systemInstruction": { "parts": [{ "text": self.system_instruction }] },
        })
    }
}

/// Join the text parts of the first candidate.
pub fn extract_text(response: &Value) -> Result<String, GenerateError> {
    let malformed = |reason: &str| GenerateError::Malformed {
        reason: reason.to_string(),
        raw: response.to_string(),
    };
    let candidate = response
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .ok_or_else(|| malformed("No candidates returned by Gemini"))?;
    let parts: Vec<&str> = candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .map(|parts| parts.iter().filter_map(|p| p.get("text")?.as_str()).collect())
        .unwrap_or_default();
    if parts.is_empty() {
        return Err(malformed("No text content returned by Gemini"));
    }
    Ok(parts.join("\n"))
}

/// Classify one HTTP response. 429 and 503 are worth retrying; any other
/// non-200 status is permanent. A 200 whose body is not usable keeps the raw
/// body for diagnosis.
pub fn outcome_for(status: u16, body: String) -> Attempt {
    match status {
        200 => {}
        429 | 503 => return Attempt::Retryable(format!("HTTP {status}")),
        _ => return Attempt::Fatal(GenerateError::Permanent { status, body }),
    }
    let parsed: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            return Attempt::Fatal(GenerateError::Malformed {
                reason: format!("response is not JSON: {e}"),
                raw: body,
            });
        }
    };
    match extract_text(&parsed) {
        Ok(text) => Attempt::Success(text),
        Err(e) => Attempt::Fatal(e),
    }
}

impl Transport for GeminiTransport {
    fn attempt(&self, prompt: &str) -> Attempt {
        let response = match self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&self.payload(prompt))
            .send()
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Attempt::Retryable(format!("request timed out: {e}")),
            Err(e) => return Attempt::Retryable(format!("network error: {e}")),
        };

        let status = response.status().as_u16();
        match response.text() {
            Ok(body) => outcome_for(status, body),
            Err(e) if status == 200 => Attempt::Retryable(format!("response body interrupted: {e}")),
            Err(_) => outcome_for(status, String::new()),
        }
    }
}
