// Summarization service HTTP client.
// Builds the authenticated request and turns responses into summaries or errors.

use std::future::Future;

use reqwest::{
    Client, Request, StatusCode,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tracing::{debug, warn};

use crate::config::{SUMMARY_LENGTH, ServiceConfig};
use crate::error::{Result, SummitError};

use super::types::SummaryResponse;

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";
const USER_AGENT: &str = concat!("summit/", env!("CARGO_PKG_VERSION"));

/// Anything that can turn an article URL into a summary.
pub trait Summarize {
    fn summarize(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Client for the article summarization service.
///
/// Each call issues exactly one request. There is no retry and no timeout.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    endpoint: String,
}

impl SummaryClient {
    /// Create a client with the credential headers from `config`.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            HeaderName::from_static(API_KEY_HEADER),
            HeaderValue::from_str(&config.api_key)
                .map_err(|e| SummitError::Other(format!("Invalid API key: {}", e)))?,
        );
        headers.insert(
            HeaderName::from_static(API_HOST_HEADER),
            HeaderValue::from_str(&config.api_host)
                .map_err(|e| SummitError::Other(format!("Invalid API host: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()
            .map_err(SummitError::Api)?;

        Ok(Self {
            client,
            endpoint: format!("{}/summarize", config.base_url.trim_end_matches('/')),
        })
    }

    /// Build the request for `url`. The article URL is percent-encoded into the query.
    pub fn request(&self, url: &str) -> Result<Request> {
        let length = SUMMARY_LENGTH.to_string();
        let params = [("url", url), ("length", length.as_str())];

        self.client
            .get(&self.endpoint)
            .query(&params)
            .build()
            .map_err(SummitError::Api)
    }
}

impl Summarize for SummaryClient {
    async fn summarize(&self, url: &str) -> Result<String> {
        let request = self.request(url)?;
        debug!(url, "Requesting summary");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        interpret_response(status, &body)
    }
}

/// Turn a status and body into a summary or a service error.
fn interpret_response(status: StatusCode, body: &str) -> Result<String> {
    let parsed = SummaryResponse::from_body(body);
    let message = parsed.diagnostic();

    if status.is_success() {
        if let Some(summary) = parsed.usable_summary() {
            return Ok(summary);
        }
        warn!(%status, "Response carried no summary");
    } else {
        warn!(%status, %message, "Summarization service returned an error");
    }

    Err(SummitError::Service {
        status: Some(status.as_u16()),
        message,
    })
}
