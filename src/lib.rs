// Re-export modules
pub mod batch;
pub mod classify;
pub mod config;
pub mod engine;
pub mod export;
pub mod fetch;
pub mod page;
pub mod results;
pub mod urls;

// Re-export commonly used types for convenience
pub use results::{CrawlStatus, DomainResult, PageStructure, SubpageFinding};

use crate::batch::{BatchRunner, ProgressObserver};
use crate::classify::Classifier;
use crate::config::FetcherConfig;
use crate::engine::CrawlEngine;
use crate::fetch::{FetchError, WebDriverFetcher};

/// Main builder for scanning a batch of seed URLs for partner programs
pub struct Scout {
    config: FetcherConfig,
    classifier: Classifier,
}

impl Scout {
    /// Creates a scout with default fetcher settings
    pub fn new() -> Self {
        Self {
            config: FetcherConfig::default(),
            classifier: Classifier::default(),
        }
    }

    /// Sets the fetcher configuration
    pub fn with_config(mut self, config: FetcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the default classifier
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Crawls every seed URL against a single browser session
    ///
    /// The WebDriver session is acquired once for the whole batch and
    /// closed before this returns, whether or not individual seeds failed.
    /// One result is produced per input URL, in input order.
    pub async fn run(
        self,
        urls: &[String],
        observer: &mut dyn ProgressObserver,
    ) -> Result<Vec<DomainResult>, FetchError> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        let fetcher = WebDriverFetcher::connect(config).await?;
        let engine = CrawlEngine::new(fetcher).with_classifier(self.classifier);
        let mut runner = BatchRunner::new(engine);

        // run_all never fails, so the session is always handed back
        // and released below
        let results = runner.run_all(urls, observer).await;
        runner.into_engine().into_fetcher().close().await;

        Ok(results)
    }
}

impl Default for Scout {
    fn default() -> Self {
        Self::new()
    }
}
