use crate::engine::CrawlEngine;
use crate::fetch::PageFetcher;
use crate::results::{CrawlStatus, DomainResult};

/// Receives a signal after each seed URL completes
pub trait ProgressObserver {
    fn on_progress(&mut self, completed: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressObserver for F {
    fn on_progress(&mut self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Runs seed URLs through a crawl engine, one at a time
pub struct BatchRunner<F> {
    engine: CrawlEngine<F>,
}

impl<F: PageFetcher> BatchRunner<F> {
    pub fn new(engine: CrawlEngine<F>) -> Self {
        Self { engine }
    }

    /// Hands the engine back once the batch is finished
    pub fn into_engine(self) -> CrawlEngine<F> {
        self.engine
    }

    /// Crawls every URL in order, yielding one result per input
    ///
    /// Each seed gets a fresh visited scope; one seed's failure never stops
    /// the rest of the batch. The observer is notified after each seed.
    pub async fn run_all(
        &mut self,
        urls: &[String],
        observer: &mut dyn ProgressObserver,
    ) -> Vec<DomainResult> {
        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        for (index, url) in urls.iter().enumerate() {
            ::log::info!("Processing URL: {}", url);

            let result = self.engine.crawl(url).await;
            if let CrawlStatus::Error(message) = &result.status {
                ::log::error!("Error processing URL {}: {}", url, message);
            }
            results.push(result);

            observer.on_progress(index + 1, total);
        }

        results
    }
}
