// Article lookup workflow.
// Checks the history first and only asks the summarizer on a miss.

use reqwest::Url;
use tracing::{error, info};

use crate::error::{Result, SummitError};
use crate::history::{Article, ArticleStore, History};
use crate::summarizer::Summarize;

/// State of the article shown in the result panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LookupState {
    #[default]
    Idle,
    Requesting {
        url: String,
    },
    Success(Article),
    Failed(String),
}

impl LookupState {
    pub fn is_requesting(&self) -> bool {
        matches!(self, LookupState::Requesting { .. })
    }
}

/// Outcome of checking a submitted URL against the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Cached(Article),
    Fetch(String),
}

/// Validate `input` and look it up in the history.
///
/// Surrounding whitespace is trimmed; the URL is otherwise used verbatim as the key.
pub fn begin<S: ArticleStore>(history: &History<S>, input: &str) -> Result<Resolution> {
    let url = input.trim();
    if url.is_empty() {
        return Err(SummitError::InvalidUrl("empty".to_string()));
    }
    Url::parse(url).map_err(|e| SummitError::InvalidUrl(format!("{} ({})", url, e)))?;

    match history.find(url) {
        Some(article) => {
            info!(url, "History hit");
            Ok(Resolution::Cached(article.clone()))
        }
        None => Ok(Resolution::Fetch(url.to_string())),
    }
}

/// Record the result of a summarization request for `url`.
pub fn complete<S: ArticleStore>(
    history: &mut History<S>,
    url: String,
    result: Result<String>,
) -> LookupState {
    match result {
        Ok(summary) => {
            let article = Article::new(url, summary);
            if let Err(e) = history.prepend_and_persist(article.clone()) {
                error!(error = %e, "Failed to persist article history");
            }
            info!(url = %article.url, "Summarized article");
            LookupState::Success(article)
        }
        Err(e) => {
            error!(%url, status = ?e.status(), error = %e, "Summarization failed");
            LookupState::Failed(e.display_message())
        }
    }
}

/// Run a complete lookup for `input`.
pub async fn lookup<S: ArticleStore, C: Summarize>(
    history: &mut History<S>,
    client: &C,
    input: &str,
) -> LookupState {
    match begin(history, input) {
        Ok(Resolution::Cached(article)) => LookupState::Success(article),
        Ok(Resolution::Fetch(url)) => {
            let result = client.summarize(&url).await;
            complete(history, url, result)
        }
        Err(e) => LookupState::Failed(e.display_message()),
    }
}
