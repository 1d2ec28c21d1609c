use crate::{
    constants::{CHAT_ENDPOINT_PATH, CONNECT_FAILURE_FALLBACK, NO_RESPONSE_FALLBACK},
    errors::{ChatPalError, ChatPalResult},
    logging::{log_api_call, summarize_request},
    models::ApiCallLog,
};
use chrono::Utc;
use rand::Rng;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Sends one user turn to the backend and extracts a displayable reply.
///
/// The HTTP status code is never branched on: the backend reports its own
/// failures as JSON bodies with 4xx/5xx statuses, and those `error` strings
/// are displayed like any other reply.
pub async fn fetch_reply(base_url: &str, user_text: &str) -> ChatPalResult<String> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), CHAT_ENDPOINT_PATH);
    let started = Instant::now();

    let client = Client::new();
    let response = match client
        .post(&url)
        .json(&json!({ "message": user_text }))
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            record_call(&url, user_text, 0, started.elapsed());
            return Err(e.into());
        }
    };

    let status = response.status().as_u16();
    let body_text = match response.text().await {
        Ok(body_text) => body_text,
        Err(e) => {
            record_call(&url, user_text, status, started.elapsed());
            return Err(e.into());
        }
    };

    record_call(&url, user_text, status, started.elapsed());
    log::debug!("backend answered {} with {} bytes", status, body_text.len());

    let body: Value = serde_json::from_str(&body_text)
        .map_err(|e| ChatPalError::malformed_response(format!("body is not JSON: {}", e)))?;

    extract_reply(&body).ok_or_else(|| {
        ChatPalError::malformed_response("response carries no usable 'response' or 'error' field")
    })
}

/// Resolves a user turn to the exact text the transcript will show.
///
/// Never fails: transport errors become the fixed connectivity string and
/// malformed responses become the fixed no-response string. Applies the
/// cosmetic reply delay before handing the text back.
pub async fn resolve_reply(
    base_url: &str,
    user_text: &str,
    delay_base_ms: u64,
    delay_jitter_ms: u64,
) -> String {
    match fetch_reply(base_url, user_text).await {
        Ok(reply) => {
            pause(delay_base_ms, delay_jitter_ms).await;
            reply
        }
        Err(e) if e.is_transport() => {
            log::warn!("backend unreachable: {}", e);
            // Fixed delay only; the jitter is reserved for reachable outcomes.
            pause(delay_base_ms, 0).await;
            CONNECT_FAILURE_FALLBACK.to_string()
        }
        Err(e) => {
            log::warn!("unusable backend response: {}", e);
            pause(delay_base_ms, delay_jitter_ms).await;
            NO_RESPONSE_FALLBACK.to_string()
        }
    }
}

/// `response` wins over `error`; empty strings count as absent, matching the
/// backend contract where both fields are optional.
fn extract_reply(body: &Value) -> Option<String> {
    body["response"]
        .as_str()
        .filter(|s| !s.is_empty())
        .or_else(|| body["error"].as_str().filter(|s| !s.is_empty()))
        .map(|s| s.to_string())
}

fn record_call(endpoint: &str, user_text: &str, status: u16, elapsed: Duration) {
    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        endpoint: endpoint.to_string(),
        request_summary: summarize_request(user_text),
        response_status: status,
        response_time_ms: elapsed.as_millis(),
    });
}

async fn pause(base_ms: u64, jitter_ms: u64) {
    let jitter = if jitter_ms > 0 {
        rand::rng().random_range(0..jitter_ms)
    } else {
        0
    };
    let total = base_ms + jitter;
    if total > 0 {
        sleep(Duration::from_millis(total)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn mock_backend(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CHAT_ENDPOINT_PATH))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn response_field_is_preferred() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CHAT_ENDPOINT_PATH))
            .and(body_json(json!({ "message": "hi" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "hello there" })),
            )
            .mount(&server)
            .await;

        let reply = fetch_reply(&server.uri(), "hi").await.unwrap();
        assert_eq!(reply, "hello there");
    }

    #[tokio::test]
    async fn error_field_is_displayed_as_a_reply() {
        let server =
            mock_backend(ResponseTemplate::new(200).set_body_json(json!({ "error": "Y" }))).await;

        let reply = fetch_reply(&server.uri(), "hi").await.unwrap();
        assert_eq!(reply, "Y");
    }

    #[tokio::test]
    async fn status_code_is_ignored_when_body_parses() {
        let server =
            mock_backend(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
                .await;

        let reply = fetch_reply(&server.uri(), "hi").await.unwrap();
        assert_eq!(reply, "boom");
    }

    #[tokio::test]
    async fn empty_response_string_falls_through_to_error() {
        let server = mock_backend(
            ResponseTemplate::new(200).set_body_json(json!({ "response": "", "error": "fallback" })),
        )
        .await;

        let reply = fetch_reply(&server.uri(), "hi").await.unwrap();
        assert_eq!(reply, "fallback");
    }

    #[tokio::test]
    async fn body_without_either_field_resolves_to_no_response() {
        let server = mock_backend(ResponseTemplate::new(200).set_body_json(json!({}))).await;

        assert!(fetch_reply(&server.uri(), "hi").await.is_err());
        let reply = resolve_reply(&server.uri(), "hi", 0, 0).await;
        assert_eq!(reply, NO_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn non_json_body_resolves_to_no_response() {
        let server =
            mock_backend(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

        let reply = resolve_reply(&server.uri(), "hi", 0, 0).await;
        assert_eq!(reply, NO_RESPONSE_FALLBACK);
    }

    #[tokio::test]
    async fn transport_failure_resolves_to_connectivity_fallback() {
        // Nothing listens on port 1.
        let reply = resolve_reply("http://127.0.0.1:1", "hi", 0, 0).await;
        assert_eq!(reply, CONNECT_FAILURE_FALLBACK);
    }
}
