use async_trait::async_trait;

use crate::diagnostics::Operation;
use crate::models::{fields, Store};
use crate::parsers::PriceFormat;
use crate::scrapers::{PageExtractor, StoreScraper};

/// Trendyol product pages. Prices read `1.299,90 TL`; sold-out size tiles
/// carry the `so` class, which the configured size selector excludes.
pub struct TrendyolScraper {
    extractor: PageExtractor,
}

impl TrendyolScraper {
    pub const PRICE_FORMAT: PriceFormat = PriceFormat::TURKISH_LIRA;

    pub fn new(extractor: PageExtractor) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl StoreScraper for TrendyolScraper {
    fn store(&self) -> Store {
        Store::Trendyol
    }

    async fn get_price(&self) -> f64 {
        self.extractor.price(&Self::PRICE_FORMAT).await
    }

    async fn get_sizes(&self) -> Vec<String> {
        self.extractor
            .labels(Operation::Sizes, fields::SIZE_AVAILABLE)
            .await
    }

    async fn get_unavailable_sizes(&self) -> Vec<String> {
        self.extractor
            .labels(Operation::UnavailableSizes, fields::SIZE_UNAVAILABLE)
            .await
    }
}
