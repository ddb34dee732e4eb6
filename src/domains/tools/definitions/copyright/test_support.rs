//! In-memory [`SearchTransport`] for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::error::FetchError;
use super::fetcher::{RawResponse, SearchTransport};

enum Reply {
    Respond(RawResponse),
    Fail(String),
    Panic(String),
}

/// Returns one canned reply for every request and records the URLs asked for.
pub struct FakeTransport {
    reply: Reply,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn respond(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Respond(RawResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn json(body: Value) -> Arc<Self> {
        Self::respond(200, &body.to_string())
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn panicking(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::Panic(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match &self.reply {
            Reply::Respond(raw) => Ok(raw.clone()),
            Reply::Fail(msg) => Err(FetchError::transport(msg.clone())),
            Reply::Panic(msg) => panic!("{}", msg),
        }
    }
}
