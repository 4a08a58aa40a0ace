use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::error::ScraperError;
use crate::models::{SelectorConfig, Store};
use crate::page::PageQuery;

mod bershka;
mod extract;
mod trendyol;
mod zara;

pub use bershka::BershkaScraper;
pub use extract::PageExtractor;
pub use trendyol::TrendyolScraper;
pub use zara::ZaraScraper;

pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Price, size and stock extraction for one product page.
///
/// None of the operations fail: a price that cannot be read is
/// `PRICE_UNAVAILABLE` (`0.0`) and unreadable sizes are an empty list. The
/// cause goes to the diagnostics sink the scraper was built with.
#[async_trait]
pub trait StoreScraper: Send + Sync {
    fn store(&self) -> Store;

    async fn get_price(&self) -> f64;

    /// Sizes that can be ordered, in page order.
    async fn get_sizes(&self) -> Vec<String>;

    /// Sizes shown as sold out. Empty when the store has no marker selector.
    async fn get_unavailable_sizes(&self) -> Vec<String> {
        Vec::new()
    }

    async fn is_in_stock(&self) -> bool {
        !self.get_sizes().await.is_empty()
    }
}

/// Maps store names to their scraper.
#[derive(Clone)]
pub struct ScraperFactory {
    diagnostics: Arc<dyn DiagnosticsSink>,
    wait_timeout: Duration,
}

impl Default for ScraperFactory {
    fn default() -> Self {
        Self {
            diagnostics: Arc::new(TracingSink),
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

impl ScraperFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Build the scraper registered under `store_name`.
    ///
    /// `Ok(None)` means the store is not supported. Selector JSON that does
    /// not deserialize is an error.
    pub fn resolve(
        &self,
        store_name: &str,
        page: Arc<dyn PageQuery>,
        selectors_json: &str,
    ) -> Result<Option<Box<dyn StoreScraper>>, ScraperError> {
        let Some(store) = Store::from_name(store_name) else {
            debug!("No scraper registered for store {:?}", store_name);
            return Ok(None);
        };

        let selectors = SelectorConfig::from_json(selectors_json)?;
        Ok(Some(self.build(store, page, selectors)))
    }

    pub fn build(
        &self,
        store: Store,
        page: Arc<dyn PageQuery>,
        selectors: SelectorConfig,
    ) -> Box<dyn StoreScraper> {
        let extractor = PageExtractor::new(
            store,
            page,
            selectors,
            self.diagnostics.clone(),
            self.wait_timeout,
        );

        match store {
            Store::Trendyol => Box::new(TrendyolScraper::new(extractor)),
            Store::Bershka => Box::new(BershkaScraper::new(extractor)),
            Store::Zara => Box::new(ZaraScraper),
        }
    }
}
