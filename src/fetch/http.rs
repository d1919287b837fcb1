// src/fetch/http.rs
// =============================================================================
// This module fetches listing pages over HTTP(S).
//
// Key functionality:
// - Builds one reqwest Client for the whole run (connection pooling)
// - GETs a page and returns its body plus the final URL after redirects
// - HEADs a file to read Content-Length / Last-Modified (--probe)
// - Optionally accepts invalid TLS certificates ("insecure mode"), because
//   many listing servers run with self-signed certificates
//
// Requests are made one at a time by the crawler, so there is no
// concurrency here.
//
// Rust concepts:
// - async/await: reqwest's API is async, we just await each call in turn
// - thiserror: Derives std::error::Error for our FetchError enum
// =============================================================================

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, CONTENT_LENGTH, LAST_MODIFIED};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

/// Everything that can go wrong while fetching one URL
#[derive(Debug, Error)]
pub enum FetchError {
    /// The client could not be constructed (bad TLS backend, etc.)
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The server answered, but not with a 2xx status
    #[error("HTTP {}", .0.as_u16())]
    Status(StatusCode),
    /// The request did not finish within the configured timeout
    #[error("request timed out")]
    Timeout,
    /// Connection refused, DNS failure, TLS failure, broken body, ...
    #[error("{0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    // Timeouts get their own variant so the message says what happened
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(error)
        }
    }
}

/// How the HTTP client should behave
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Per-request timeout
    pub timeout: Duration,
    /// Validate TLS certificates (off by default, like the tool always did)
    pub verify_tls: bool,
    /// Value of the User-Agent header
    pub user_agent: String,
    /// How many redirects to follow before giving up
    pub max_redirects: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            verify_tls: false,
            user_agent: format!("listing-tree/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 5,
        }
    }
}

/// A fetched listing page
#[derive(Debug, Clone)]
pub struct Page {
    /// Where we ended up after following redirects
    pub final_url: Url,
    /// The HTML body
    pub body: String,
}

/// The two headers --probe cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeaders {
    pub content_length: Option<String>,
    pub last_modified: Option<String>,
}

impl FileHeaders {
    fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            content_length: read(CONTENT_LENGTH),
            last_modified: read(LAST_MODIFIED),
        }
    }
}

/// The one HTTP client used for a whole crawl
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(settings.max_redirects))
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    /// GETs a listing page
    ///
    /// Any non-2xx status is an error; the caller decides what that means
    /// for the crawl (it skips the subtree).
    pub async fn fetch_page(&self, url: &Url) -> Result<Page, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let final_url = response.url().clone();
        let body = response.text().await?;

        Ok(Page { final_url, body })
    }

    /// HEADs a file to learn its size and modification date
    ///
    /// Only headers are read, the file itself is never downloaded.
    pub async fn probe_file(&self, url: &Url) -> Result<FileHeaders, FetchError> {
        let response = self.client.head(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(FileHeaders::from_headers(response.headers()))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does danger_accept_invalid_certs do?
//    - It turns off TLS certificate validation
//    - Expired, self-signed or wrong-host certificates are accepted
//    - That's why it's a setting (--verify-tls turns validation back on)
//      and why main.rs logs a warning when it's off
//
// 2. Why implement From<reqwest::Error>?
//    - The `?` operator calls From::from to convert errors
//    - So `send().await?` turns a reqwest::Error into a FetchError for free
//
// 3. What is #[source]?
//    - Tells thiserror which field is the underlying cause
//    - anyhow's "{:#}" formatting then prints the whole chain
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> Fetcher {
        Fetcher::new(&FetchSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_page_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pub/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/pub/", server.uri())).unwrap();
        let page = fetcher().fetch_page(&url).await.unwrap();
        assert_eq!(page.body, "<html>ok</html>");
        assert_eq!(page.final_url, url);
    }

    #[tokio::test]
    async fn test_fetch_page_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pub"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/pub/", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pub/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("listing"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/pub", server.uri())).unwrap();
        let page = fetcher().fetch_page(&url).await.unwrap();
        assert_eq!(page.final_url.path(), "/pub/");
        assert_eq!(page.body, "listing");
    }

    #[tokio::test]
    async fn test_fetch_page_fails_on_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/broken/", server.uri())).unwrap();
        let error = fetcher().fetch_page(&url).await.unwrap_err();
        assert!(matches!(error, FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert_eq!(error.to_string(), "HTTP 500");
    }

    #[tokio::test]
    async fn test_fetch_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let settings = FetchSettings {
            timeout: Duration::from_millis(50),
            ..FetchSettings::default()
        };
        let fetcher = Fetcher::new(&settings).unwrap();
        let url = Url::parse(&format!("{}/slow/", server.uri())).unwrap();
        let error = fetcher.fetch_page(&url).await.unwrap_err();
        assert!(matches!(error, FetchError::Timeout));
    }

    #[tokio::test]
    async fn test_probe_reads_headers() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/pub/big.iso"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Length", "734003200")
                    .insert_header("Last-Modified", "Mon, 01 Jan 2024 10:00:00 GMT"),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/pub/big.iso", server.uri())).unwrap();
        let headers = fetcher().probe_file(&url).await.unwrap();
        assert_eq!(headers.last_modified.as_deref(), Some("Mon, 01 Jan 2024 10:00:00 GMT"));
        assert!(headers.content_length.is_some());
    }

    #[test]
    fn test_default_settings_are_insecure() {
        let settings = FetchSettings::default();
        assert!(!settings.verify_tls);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(settings.user_agent.starts_with("listing-tree/"));
    }
}
