// Service configuration.
// Summarization endpoint and credentials are read from the environment.

use reqwest::Url;

use crate::error::{Result, SummitError};

pub const API_KEY_VAR: &str = "SUMMIT_API_KEY";
pub const API_HOST_VAR: &str = "SUMMIT_API_HOST";
pub const BASE_URL_VAR: &str = "SUMMIT_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://article-extractor-and-summarizer.p.rapidapi.com/";

/// Number of paragraphs requested from the service.
pub const SUMMARY_LENGTH: u8 = 3;

/// Where and how to reach the summarization service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_host: String,
}

impl ServiceConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var(API_KEY_VAR).ok_or(SummitError::MissingConfig(API_KEY_VAR))?;
        let base_url = var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_host = match var(API_HOST_VAR) {
            Some(host) => host,
            None => host_of(&base_url)?,
        };

        Ok(Self {
            base_url,
            api_key,
            api_host,
        })
    }
}

fn host_of(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url)
        .map_err(|e| SummitError::Other(format!("Invalid {}: {}", BASE_URL_VAR, e)))?;
    url.host_str()
        .map(str::to_string)
        .ok_or_else(|| SummitError::Other(format!("{} has no host", BASE_URL_VAR)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_derive_host_from_base_url() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "secret")])).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            config.api_host,
            "article-extractor-and-summarizer.p.rapidapi.com"
        );
    }

    #[test]
    fn test_explicit_values_win() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (API_HOST_VAR, "summaries.internal"),
            (BASE_URL_VAR, "http://127.0.0.1:9000"),
        ]))
        .unwrap();

        assert_eq!(config.api_host, "summaries.internal");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_missing_or_blank_key_is_an_error() {
        let missing = ServiceConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(missing, Err(SummitError::MissingConfig(API_KEY_VAR))));

        let blank = ServiceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")]));
        assert!(matches!(blank, Err(SummitError::MissingConfig(API_KEY_VAR))));
    }

    #[test]
    fn test_unparseable_base_url() {
        let result = ServiceConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "not a url"),
        ]));
        assert!(matches!(result, Err(SummitError::Other(_))));
    }
}
