// Summarization service response types.

use serde::Deserialize;

/// Body returned by the `summarize` endpoint.
///
/// Successful responses carry `summary`. Failures usually carry `error`,
/// some gateways use `message` instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SummaryResponse {
    /// Parse a response body, treating anything unparseable as an empty response.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// The summary, if present and non-empty.
    pub fn usable_summary(self) -> Option<String> {
        self.summary.filter(|summary| !summary.is_empty())
    }

    /// Diagnostic text supplied by the service, or an empty string.
    pub fn diagnostic(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_default()
    }
}
