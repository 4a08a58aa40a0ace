use chrono::Utc;
use std::fmt;

use crate::models::{ProductSnapshot, ANY_SIZE};
use crate::scrapers::StoreScraper;

/// What a user asked to be told about for one product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchRule {
    /// Size to watch; `None` or `hepsi` means any size.
    pub size: Option<String>,
    pub threshold: Option<f64>,
}

impl WatchRule {
    fn watched_size(&self) -> Option<&str> {
        self.size
            .as_deref()
            .map(str::trim)
            .filter(|size| !size.is_empty() && !size.eq_ignore_ascii_case(ANY_SIZE))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductChange {
    PriceDropped { old: f64, new: f64 },
    PriceIncreased { old: f64, new: f64 },
    ThresholdReached { threshold: f64, price: f64 },
    BackInStock,
    OutOfStock,
    SizeAvailable { size: String },
}

impl ProductChange {
    /// Percentage discount of a price drop.
    pub fn discount_percent(&self) -> Option<f64> {
        match self {
            ProductChange::PriceDropped { old, new } if *old > 0.0 => {
                Some((old - new) / old * 100.0)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ProductChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductChange::PriceDropped { old, new } => write!(
                f,
                "price dropped from {:.2} to {:.2} ({:.1}% off)",
                old,
                new,
                self.discount_percent().unwrap_or_default()
            ),
            ProductChange::PriceIncreased { old, new } => {
                write!(f, "price increased from {:.2} to {:.2}", old, new)
            }
            ProductChange::ThresholdReached { threshold, price } => {
                write!(f, "price {:.2} reached threshold {:.2}", price, threshold)
            }
            ProductChange::BackInStock => write!(f, "back in stock"),
            ProductChange::OutOfStock => write!(f, "out of stock"),
            ProductChange::SizeAvailable { size } => write!(f, "size {} is available", size),
        }
    }
}

/// Read every field of a product page once.
pub async fn capture(scraper: &dyn StoreScraper, url: &str) -> ProductSnapshot {
    let price = scraper.get_price().await;
    let sizes = scraper.get_sizes().await;
    let unavailable_sizes = scraper.get_unavailable_sizes().await;

    ProductSnapshot {
        store: scraper.store(),
        url: url.to_string(),
        price,
        in_stock: !sizes.is_empty(),
        sizes,
        unavailable_sizes,
        checked_at: Utc::now(),
    }
}

/// Changes between two observations of the same product. An unreadable price
/// on either side suppresses the price events.
pub fn diff(
    previous: Option<&ProductSnapshot>,
    current: &ProductSnapshot,
    rule: &WatchRule,
) -> Vec<ProductChange> {
    let mut changes = Vec::new();
    let watched_size = rule.watched_size();
    let watched_available = match watched_size {
        Some(size) => current.has_size(size),
        None => current.in_stock,
    };

    if let Some(previous) = previous {
        if previous.has_price() && current.has_price() {
            if current.price < previous.price && watched_available {
                changes.push(ProductChange::PriceDropped {
                    old: previous.price,
                    new: current.price,
                });
            } else if current.price > previous.price {
                changes.push(ProductChange::PriceIncreased {
                    old: previous.price,
                    new: current.price,
                });
            }
        }

        if current.in_stock && !previous.in_stock {
            changes.push(ProductChange::BackInStock);
        } else if !current.in_stock && previous.in_stock {
            changes.push(ProductChange::OutOfStock);
        }

        if let Some(size) = watched_size {
            if current.has_size(size) && !previous.has_size(size) {
                changes.push(ProductChange::SizeAvailable {
                    size: size.to_string(),
                });
            }
        }
    }

    if let Some(threshold) = rule.threshold {
        let was_above = previous
            .filter(|p| p.has_price())
            .map_or(true, |p| p.price > threshold);
        if current.has_price() && current.price <= threshold && was_above {
            changes.push(ProductChange::ThresholdReached {
                threshold,
                price: current.price,
            });
        }
    }

    changes
}
