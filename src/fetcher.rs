use reqwest::StatusCode;
use scraper::Html;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(StatusCode),
    #[error("unreadable body: {0}")]
    Body(reqwest::Error),
}

/// Source of parsed pages. A failed fetch is `None`; the implementation is
/// responsible for reporting why.
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Option<Html>;
}

/// Plain GET over a default reqwest client. No retries, no custom headers.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::Client::new(),
        }
    }

    async fn get(&self, url: &str) -> Result<Html, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text().await.map_err(FetchError::Body)?;
        Ok(Html::parse_document(&body))
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<Html> {
        match self.get(url).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Error fetching {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// In-memory site: URL → HTML. Unknown URLs behave like failed fetches.
    #[derive(Default)]
    pub struct StaticSite {
        pages: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl StaticSite {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
            self.pages.insert(url.into(), html.into());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.borrow().clone()
        }

        pub fn was_requested(&self, url: &str) -> bool {
            self.requested.borrow().iter().any(|u| u == url)
        }
    }

    impl Fetch for StaticSite {
        async fn fetch(&self, url: &str) -> Option<Html> {
            self.requested.borrow_mut().push(url.to_string());
            self.pages.get(url).map(|html| Html::parse_document(html))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_host_is_none() {
        let fetcher = HttpFetcher::new();
        assert!(fetcher.fetch("http://127.0.0.1:9/users/nobody?page=1").await.is_none());
    }

    #[tokio::test]
    async fn default_client_behaves_like_new() {
        let fetcher = HttpFetcher::default();
        assert!(fetcher.fetch("http://127.0.0.1:9/").await.is_none());
    }

    #[test]
    fn status_error_message() {
        let e = FetchError::Status(StatusCode::NOT_FOUND);
        assert_eq!(e.to_string(), "HTTP 404 Not Found");
    }
}
