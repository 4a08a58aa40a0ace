use async_trait::async_trait;

use crate::models::{Store, PRICE_UNAVAILABLE};
use crate::scrapers::StoreScraper;

/// Reserves the Zara store name until its selectors are known. Never touches
/// the page and always reports the failure sentinels.
#[derive(Debug, Default)]
pub struct ZaraScraper;

#[async_trait]
impl StoreScraper for ZaraScraper {
    fn store(&self) -> Store {
        Store::Zara
    }

    async fn get_price(&self) -> f64 {
        PRICE_UNAVAILABLE
    }

    async fn get_sizes(&self) -> Vec<String> {
        Vec::new()
    }
}
