use crate::config::FetcherConfig;
use crate::page::PageSnapshot;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use thiserror::Error;
use tokio::time::timeout;

/// Errors raised while fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    /// No WebDriver session could be established
    #[error("could not reach a WebDriver server: {0}")]
    Session(String),

    /// Navigation to the URL failed
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// The page did not finish loading in time
    #[error("page load timed out after {0} seconds")]
    Timeout(u64),

    /// The page never reached the readiness condition
    #[error("page body never appeared: {0}")]
    NotReady(String),
}

/// Capability to render a URL and return a snapshot of the result
///
/// Fetching a page is the only effectful operation in a crawl; everything
/// downstream works on the returned [`PageSnapshot`].
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&mut self, url: &str) -> Result<PageSnapshot, FetchError>;
}

/// Page fetcher backed by a WebDriver browser session
pub struct WebDriverFetcher {
    client: Client,
    config: FetcherConfig,
}

impl WebDriverFetcher {
    /// Connects to a WebDriver server
    ///
    /// Falls back through a list of common endpoints when the configured
    /// one is unreachable.
    pub async fn connect(config: FetcherConfig) -> Result<Self, FetchError> {
        let client = connect_with_fallbacks(&config.webdriver_url).await?;
        Ok(Self { client, config })
    }

    /// Ends the browser session
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
    }

    /// Navigates, waits for the body element, and snapshots the page source
    async fn visit(&mut self, url: &str) -> Result<PageSnapshot, FetchError> {
        self.client
            .goto(url)
            .await
            .map_err(|e| FetchError::Navigation(e.to_string()))?;

        // Readiness condition: the body element is present
        self.client
            .wait()
            .at_most(self.config.ready_duration())
            .for_element(Locator::Css("body"))
            .await
            .map_err(|e| FetchError::NotReady(e.to_string()))?;

        let source = self
            .client
            .source()
            .await
            .map_err(|e| FetchError::Navigation(e.to_string()))?;

        Ok(PageSnapshot::from_html(url, &source))
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&mut self, url: &str) -> Result<PageSnapshot, FetchError> {
        ::log::debug!("FETCH: {}", url);

        // Bound the whole visit so one hung page cannot stall the batch
        // longer than the configured page load timeout
        match timeout(self.config.page_load_duration(), self.visit(url)).await {
            Ok(result) => result,
            Err(_) => {
                ::log::error!("Timeout fetching: {}", url);
                Err(FetchError::Timeout(self.config.page_load_timeout))
            }
        }
    }
}

/// Connects to the configured WebDriver URL, then to common alternatives
async fn connect_with_fallbacks(webdriver_url: &str) -> Result<Client, FetchError> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4444", // Selenium default
        "http://127.0.0.1:4444", // Try with IP instead of localhost
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue; // Skip if it's the same as the one we already tried
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    Err(FetchError::Session(format!(
        "no WebDriver server reachable (tried {} and fallbacks)",
        webdriver_url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        let timeout = FetchError::Timeout(30);
        assert_eq!(timeout.to_string(), "page load timed out after 30 seconds");

        let session = FetchError::Session("connection refused".to_string());
        assert!(session.to_string().contains("connection refused"));
    }
}
