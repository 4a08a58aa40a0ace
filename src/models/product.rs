use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Store;

/// Returned by price extraction when the price could not be read. It does not
/// mean the product is free.
pub const PRICE_UNAVAILABLE: f64 = 0.0;

pub fn is_price_known(price: f64) -> bool {
    price > PRICE_UNAVAILABLE
}

/// One observation of a product page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub store: Store,
    pub url: String,
    pub price: f64,
    pub sizes: Vec<String>,
    pub unavailable_sizes: Vec<String>,
    pub in_stock: bool,
    pub checked_at: DateTime<Utc>,
}

impl ProductSnapshot {
    pub fn has_price(&self) -> bool {
        is_price_known(self.price)
    }

    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}
