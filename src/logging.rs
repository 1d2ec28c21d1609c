// src/logging.rs

use crate::models::ApiCallLog;
use std::fs::OpenOptions;
use std::io::Write;

/// Appends an API call record to the `api_calls.log` file.
/// Logging failures are swallowed; they must never reach the chat surface.
pub fn log_api_call(log: &ApiCallLog) {
    let log_entry = format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    );

    match OpenOptions::new()
        .append(true)
        .create(true)
        .open("api_calls.log")
    {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                log::warn!("failed to write to api_calls.log: {}", e);
            }
        }
        Err(e) => log::warn!("failed to open api_calls.log: {}", e),
    }
}

/// Truncates user text for the request summary column.
pub fn summarize_request(text: &str) -> String {
    const MAX: usize = 100;
    if text.chars().count() > MAX {
        let truncated: String = text.chars().take(MAX).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_request_keeps_short_text() {
        assert_eq!(summarize_request("hello"), "hello");
    }

    #[test]
    fn summarize_request_truncates_long_text() {
        let long = "x".repeat(250);
        let summary = summarize_request(&long);
        assert_eq!(summary.chars().count(), 103);
        assert!(summary.ends_with("..."));
    }
}
