use async_trait::async_trait;

use crate::diagnostics::Operation;
use crate::models::{fields, Store};
use crate::parsers::PriceFormat;
use crate::scrapers::{PageExtractor, StoreScraper};

pub struct BershkaScraper {
    extractor: PageExtractor,
}

impl BershkaScraper {
    // Bershka switches between the `TL` suffix and the lira sign.
    pub const PRICE_FORMAT: PriceFormat = PriceFormat {
        currency_markers: &["TL", "₺"],
        thousands_separator: Some('.'),
        decimal_separator: ',',
    };

    pub fn new(extractor: PageExtractor) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl StoreScraper for BershkaScraper {
    fn store(&self) -> Store {
        Store::Bershka
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
