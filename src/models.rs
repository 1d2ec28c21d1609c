// src/models.rs

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry. Immutable once created; the transcript is an
/// append-only Vec cleared only by a full session reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            sender: Sender::User,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Message {
            sender: Sender::Bot,
            content: content.into(),
            timestamp: Local::now(),
        }
    }
}

/// Logs details of each backend call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
