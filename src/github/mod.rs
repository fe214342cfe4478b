//! GitHub Repository Listing
//!
//! Lazy, paginated listing of the most popular C++ repositories via the
//! search API. Pages are followed through the `Link: rel="next"` header; a
//! non-success response terminates the sequence with an error.

use serde::Deserialize;

/// First page of the search: top C++ repositories by stars
pub const SEARCH_URL: &str =
    "https://api.github.com/search/repositories?q=language:cpp&per_page=100";

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request {url} was not successful: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

pub type GithubResult<T> = Result<T, GithubError>;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<RepoItem>,
}

#[derive(Debug, Deserialize)]
struct RepoItem {
    full_name: String,
}

/// Paginated repository search, consumed one page at a time
pub struct RepoSearch {
    client: reqwest::Client,
    next_url: Option<String>,
}

impl RepoSearch {
    /// Search starting from the default first page
    pub fn new() -> GithubResult<Self> {
        Self::with_url(SEARCH_URL)
    }

    /// Search starting from an explicit URL
    pub fn with_url(url: impl Into<String>) -> GithubResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("algostat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            next_url: Some(url.into()),
        })
    }

    /// Fetch the next page of repository names
    ///
    /// Returns `Ok(None)` once the last page has been consumed.
    pub async fn next_page(&mut self) -> GithubResult<Option<Vec<String>>> {
        let url = match self.next_url.take() {
            Some(url) => url,
            None => return Ok(None),
        };

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GithubError::Status {
                url,
                status: response.status(),
            });
        }

        self.next_url = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link);

        let body: SearchResponse = response.json().await?;
        Ok(Some(
            body.items.into_iter().map(|item| item.full_name).collect(),
        ))
    }
}

// Extract the rel="next" target from a Link header value.
fn next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut pieces = part.split(';');
        let url = pieces.next()?.trim();
        if !(url.starts_with('<') && url.ends_with('>')) {
            continue;
        }
        if pieces.any(|param| param.trim() == r#"rel="next""#) {
            return Some(url[1..url.len() - 1].to_string());
        }
    }
    None
}
