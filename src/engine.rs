use crate::classify::Classifier;
use crate::fetch::{FetchError, PageFetcher};
use crate::results::{CrawlStatus, DomainResult, SubpageFinding};
use crate::urls;
use std::collections::HashSet;
use thiserror::Error;

/// Errors that abort a single seed's crawl
///
/// Only the main page fetch is fatal to a seed; subpage failures degrade
/// to empty findings inside the engine.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed's main page could not be fetched
    #[error("{0}")]
    MainFetch(#[from] FetchError),
}

/// Crawls one seed URL at a time, one level deep
///
/// The engine owns the page fetcher for the lifetime of a batch; the
/// `visited` set is scoped to a single [`crawl`](CrawlEngine::crawl) call.
pub struct CrawlEngine<F> {
    fetcher: F,
    classifier: Classifier,
}

impl<F: PageFetcher> CrawlEngine<F> {
    /// Creates an engine with the default classifier
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            classifier: Classifier::default(),
        }
    }

    /// Replaces the default classifier
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Hands the fetcher back for release
    pub fn into_fetcher(self) -> F {
        self.fetcher
    }

    /// Crawls a seed URL and aggregates findings into a domain result
    ///
    /// Never fails: errors are recorded on the result's status, preserving
    /// whatever fields were already populated.
    pub async fn crawl(&mut self, seed_url: &str) -> DomainResult {
        let mut result = DomainResult::pending(urls::base_domain(seed_url));
        let mut visited = HashSet::new();

        match self.crawl_seed(seed_url, &mut visited, &mut result).await {
            Ok(()) => result.status = CrawlStatus::Success,
            Err(e) => {
                ::log::error!("Error scraping URL {}: {}", seed_url, e);
                result.status = CrawlStatus::Error(e.to_string());
            }
        }

        result
    }

    /// Fetches the main page, then every same-domain partner link, depth 1
    async fn crawl_seed(
        &mut self,
        seed_url: &str,
        visited: &mut HashSet<String>,
        result: &mut DomainResult,
    ) -> Result<(), CrawlError> {
        let normalized = urls::normalize(seed_url);
        ::log::info!("Navigating to URL: {}", normalized);

        // The seed counts as visited even if the fetch fails
        visited.insert(normalized.clone());
        let main_page = self.fetcher.fetch(&normalized).await?;

        result.partner_program_url = normalized;
        result.program_types = self.classifier.program_types(&main_page.body_text);
        result.partner_names = self.classifier.partner_names(&main_page);
        result.page_structure = self.classifier.structure(&main_page);

        let candidates = self.classifier.partner_links(&main_page, visited);
        for link in candidates {
            if !urls::same_domain(seed_url, &link) {
                ::log::debug!("Skipping off-domain link: {}", link);
                continue;
            }

            let finding = self.visit_subpage(&link, visited).await;
            if finding.is_informative() {
                result.absorb(finding);
            }
        }

        Ok(())
    }

    /// Fetches and classifies a single subpage
    ///
    /// Failures yield an empty finding; the URL stays visited either way.
    async fn visit_subpage(&mut self, url: &str, visited: &mut HashSet<String>) -> SubpageFinding {
        if !visited.insert(url.to_string()) {
            ::log::debug!("Skipping already visited: {}", url);
            return SubpageFinding::empty(url);
        }

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                ::log::error!("Error processing sub-page {}: {}", url, e);
                return SubpageFinding::empty(url);
            }
        };

        SubpageFinding {
            url: url.to_string(),
            program_types: self.classifier.program_types(&page.body_text),
            partner_names: self.classifier.partner_names(&page),
            page_structure: self.classifier.structure(&page),
        }
    }
}
