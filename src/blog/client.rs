use super::article::{ArticleParseError, normalize_listing};
use crate::types::BlogPost;
use async_trait::async_trait;
use reqwest::Url;

pub const DEFAULT_API_BASE: &str = "https://dev.to/api";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 9;

#[derive(Debug, Clone, thiserror::Error)]
pub enum FeedError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid upstream payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        FeedError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Decode(err.to_string())
    }
}

impl From<ArticleParseError> for FeedError {
    fn from(err: ArticleParseError) -> Self {
        FeedError::Decode(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Upstream source of externally authored articles.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn list(&self, tag: Option<&str>, page: Page) -> Result<Vec<BlogPost>, FeedError>;
    async fn search(&self, query: &str, page: Page) -> Result<Vec<BlogPost>, FeedError>;
}

#[async_trait]
impl<T: ArticleSource + ?Sized> ArticleSource for std::sync::Arc<T> {
    async fn list(&self, tag: Option<&str>, page: Page) -> Result<Vec<BlogPost>, FeedError> {
        (**self).list(tag, page).await
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<BlogPost>, FeedError> {
        (**self).search(query, page).await
    }
}

/// Client for the public dev.to article API.
pub struct DevToClient {
    client: reqwest::Client,
    base: String,
}

impl DevToClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    fn articles_url(&self, page: Page, extra: Option<(&str, &str)>) -> Result<Url, FeedError> {
        let mut params = vec![
            ("page", page.number.to_string()),
            ("per_page", page.size.to_string()),
            ("state", "fresh".to_string()),
        ];
        if let Some((key, value)) = extra {
            params.push((key, value.to_string()));
        }
        Url::parse_with_params(&format!("{}/articles", self.base), &params)
            .map_err(|e| FeedError::Transport(format!("invalid article url: {e}")))
    }

    pub fn listing_url(&self, tag: Option<&str>, page: Page) -> Result<Url, FeedError> {
        self.articles_url(page, tag.filter(|t| !t.is_empty()).map(|t| ("tag", t)))
    }

    pub fn search_url(&self, query: &str, page: Page) -> Result<Url, FeedError> {
        self.articles_url(page, Some(("q", query)))
    }

    async fn get_articles(&self, url: Url) -> Result<Vec<BlogPost>, FeedError> {
        tracing::debug!(%url, "requesting articles");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(normalize_listing(value)?)
    }
}

impl Default for DevToClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[async_trait]
impl ArticleSource for DevToClient {
    async fn list(&self, tag: Option<&str>, page: Page) -> Result<Vec<BlogPost>, FeedError> {
        let url = self.listing_url(tag, page)?;
        self.get_articles(url).await
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<BlogPost>, FeedError> {
        let url = self.search_url(query, page)?;
        self.get_articles(url).await
    }
}
