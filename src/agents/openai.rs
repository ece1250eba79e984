//! Live completion port over the OpenAI chat-completions endpoint.

use super::{CompletionPort, CompletionRequest};
use serde_json::{json, Value};
use std::thread;
use std::time::Duration;
use tracing::warn;

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const MAX_ATTEMPTS: u64 = 3;
const RETRY_MARGIN_SECS: u64 = 2;
const FALLBACK_STEP_SECS: u64 = 15;

pub struct OpenAiPort {
    api_key: String,
    model: String,
}

impl OpenAiPort {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

impl CompletionPort for OpenAiPort {
    /// Bounded retry on rate limiting only: wait the provider-supplied delay
    /// plus a margin, or an attempt-indexed linear fallback. Any other
    /// failure aborts immediately and yields an empty result.
    fn complete(&self, request: &CompletionRequest) -> Option<Value> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_content},
            ],
            "temperature": request.temperature,
            "max_tokens": 4096,
            "response_format": {"type": "json_object"},
        });

        for attempt in 0..MAX_ATTEMPTS {
            match ureq::post(ENDPOINT)
                .set("Authorization", &format!("Bearer {}", self.api_key))
                .send_json(body.clone())
            {
                Ok(response) => {
                    let payload: Value = response.into_json().ok()?;
                    let content = payload["choices"][0]["message"]["content"].as_str()?;
                    return serde_json::from_str(content).ok();
                }
                Err(ureq::Error::Status(429, response)) => {
                    let wait = retry_delay(&response, attempt);
                    warn!(
                        attempt = attempt + 1,
                        wait_secs = wait.as_secs(),
                        "completion provider rate limited, backing off"
                    );
                    thread::sleep(wait);
                }
                Err(err) => {
                    warn!(error = %err, "completion call failed");
                    return None;
                }
            }
        }
        None
    }
}

fn retry_delay(response: &ureq::Response, attempt: u64) -> Duration {
    response
        .header("retry-after")
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs + RETRY_MARGIN_SECS))
        .unwrap_or_else(|| Duration::from_secs(FALLBACK_STEP_SECS * (attempt + 1)))
}
