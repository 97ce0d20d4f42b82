//! Remote fallback interpreter client
//!
//! One bounded POST to the server-side heuristic interpreter. Every failure
//! (timeout, transport, non-2xx, bad payload) is logged and reported as no
//! match; callers never see an error.

use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::intent::Intent;
use crate::wake::normalize;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request body for `POST /api/voice/interpret`
#[derive(Debug, Serialize, Deserialize)]
pub struct InterpretRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

/// Response body: `{"intent": Intent | null}`
#[derive(Debug, Serialize, Deserialize)]
pub struct InterpretResponse {
    pub intent: Option<Intent>,
}

#[derive(Clone)]
pub struct RemoteInterpreter {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl RemoteInterpreter {
    pub fn new(config: &RemoteConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: config.url.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Best effort: `None` on no match and on any failure
    pub async fn interpret(&self, text: &str) -> Option<Intent> {
        match self.try_interpret(text).await {
            Ok(intent) => intent,
            Err(e) => {
                tracing::warn!(url = %self.url, "remote fallback failed: {}", e);
                None
            }
        }
    }

    pub async fn try_interpret(&self, text: &str) -> Result<Option<Intent>, RemoteError> {
        let request = InterpretRequest {
            transcript: Some(text.to_string()),
        };
        // The client timeout covers the body read too; this bounds the whole call
        let call = async {
            let response = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .map_err(|e| self.classify(e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RemoteError::Status {
                    status: status.as_u16(),
                });
            }

            response
                .json::<InterpretResponse>()
                .await
                .map_err(|e| if e.is_timeout() { self.classify(e) } else { RemoteError::Payload(e) })
        };

        let body = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| self.timeout_error())??;

        Ok(body.intent.map(|mut intent| {
            if intent.utterance.is_empty() {
                intent.utterance = normalize(text);
            }
            intent
        }))
    }

    fn classify(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            self.timeout_error()
        } else {
            RemoteError::Transport(err)
        }
    }

    fn timeout_error(&self) -> RemoteError {
        RemoteError::Timeout {
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}
