// Scripted summarizer for tests.

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, SummitError};

use super::Summarize;

/// Summarizer that replays a canned answer and counts calls.
pub struct Scripted {
    answer: std::result::Result<String, String>,
    calls: AtomicUsize,
    last_url: Mutex<Option<String>>,
}

impl Scripted {
    pub fn ok(summary: &str) -> Self {
        Self::new(Ok(summary.to_string()))
    }

    /// Fails every call with a service error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self::new(Err(message.to_string()))
    }

    fn new(answer: std::result::Result<String, String>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

impl Summarize for Scripted {
    fn summarize(&self, url: &str) -> impl Future<Output = Result<String>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.to_string());
        let answer = self.answer.clone().map_err(|message| SummitError::Service {
            status: Some(500),
            message,
        });
        async move { answer }
    }
}
