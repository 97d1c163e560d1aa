// Lookup history.
// Ordered, persisted list of summarized articles, most recent first.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{read_json, write_json};
use crate::error::Result;

/// A summarized article. `url` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub summary: String,
}

impl Article {
    pub fn new(url: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            summary: summary.into(),
        }
    }
}

/// Persistence backend for the history.
pub trait ArticleStore {
    /// Read the stored articles. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<Article>>>;

    /// Replace the stored articles with `articles`.
    fn save(&self, articles: &[Article]) -> Result<()>;
}

/// Stores the history as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArticleStore for FileStore {
    fn load(&self) -> Result<Option<Vec<Article>>> {
        read_json(&self.path)
    }

    fn save(&self, articles: &[Article]) -> Result<()> {
        write_json(&self.path, articles)
    }
}

/// In-memory view of the history, backed by a store.
///
/// Lookups match the URL exactly; no normalization is applied, so
/// `https://a.test/x` and `https://a.test/x/` are separate entries.
#[derive(Debug)]
pub struct History<S> {
    articles: Vec<Article>,
    store: S,
}

impl<S: ArticleStore> History<S> {
    /// Load the history from `store`.
    ///
    /// A store that is empty, unreadable or malformed yields an empty history.
    pub fn load(store: S) -> Self {
        let articles = match store.load() {
            Ok(Some(articles)) => {
                debug!(count = articles.len(), "Loaded article history");
                articles
            }
            Ok(None) => {
                debug!("No article history yet");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read article history, starting empty");
                Vec::new()
            }
        };

        Self { articles, store }
    }

    /// First article whose URL equals `url`.
    pub fn find(&self, url: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.url == url)
    }

    /// Put `article` at the front and rewrite the whole store.
    ///
    /// The in-memory history is updated even when the write fails.
    pub fn prepend_and_persist(&mut self, article: Article) -> Result<()> {
        self.articles.insert(0, article);
        self.store.save(&self.articles)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
