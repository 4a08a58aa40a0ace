use anyhow::{Context, Result};
use chrono::Local;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, warn};

use price_tracker::config::{Config, TrackedProduct};
use price_tracker::models::{ProductSnapshot, Store};
use price_tracker::monitor::{capture, diff};
use price_tracker::page::{PageQuery, WebDriverPage};
use price_tracker::scrapers::ScraperFactory;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("price_tracker=info".parse()?),
        )
        .init();

    info!("Starting Price Tracker");

    let config = Arc::new(Config::load()?);
    let products = trackable_products(&config.products);
    if products.is_empty() {
        warn!("No products to track; add [[products]] entries to price_tracker.toml");
    }

    let factory = ScraperFactory::new().with_wait_timeout(config.wait_timeout());
    let mut last_seen: HashMap<String, ProductSnapshot> = HashMap::new();
    let mut interval = interval(Duration::from_secs(config.check_interval_seconds));

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                return Ok(());
            }
        }

        info!("--- Starting new check cycle at {} ---", Local::now().format("%Y-%m-%d %H:%M:%S"));

        // One browser session per product, a bounded number at a time.
        let results: Vec<(TrackedProduct, Result<Option<ProductSnapshot>>)> =
            stream::iter(products.iter().cloned())
                .map(|(product, store)| {
                    let config = config.clone();
                    let factory = factory.clone();
                    async move {
                        let result = check_product(&config, &factory, &product, store).await;
                        (product, result)
                    }
                })
                .buffer_unordered(config.max_sessions.max(1))
                .collect()
                .await;

        for (product, result) in results {
            match result {
                Ok(Some(snapshot)) => {
                    info!(
                        "{}: price {:.2}, {} sizes available ({})",
                        snapshot.store,
                        snapshot.price,
                        snapshot.sizes.len(),
                        product.url
                    );

                    for change in diff(last_seen.get(&product.url), &snapshot, &product.rule()) {
                        info!("{} ({}): {}", snapshot.store, product.url, change);
                    }

                    last_seen.insert(product.url.clone(), snapshot);
                }
                Ok(None) => warn!("Unsupported store for {}", product.url),
                Err(e) => error!("Failed to check {}: {:#}", product.url, e),
            }
        }

        info!("Check cycle completed, waiting {} seconds", config.check_interval_seconds);
    }
}

/// Products whose store is supported and whose URL is a product page of it.
/// The rest are logged once and skipped.
fn trackable_products(products: &[TrackedProduct]) -> Vec<(TrackedProduct, Store)> {
    products
        .iter()
        .filter_map(|product| match product.resolve_store() {
            Ok(Some(store)) => Some((product.clone(), store)),
            Ok(None) => {
                warn!("Unsupported store for {}; skipping", product.url);
                None
            }
            Err(e) => {
                warn!("Skipping {}: {:#}", product.url, e);
                None
            }
        })
        .collect()
}

async fn check_product(
    config: &Config,
    factory: &ScraperFactory,
    product: &TrackedProduct,
    store: Store,
) -> Result<Option<ProductSnapshot>> {
    let page = Arc::new(
        WebDriverPage::connect(&config.webdriver_url, config.headless)
            .await
            .context("Failed to open WebDriver session")?,
    );

    let snapshot = scrape_page(config, factory, store, page.clone(), &product.url).await;

    match Arc::try_unwrap(page) {
        Ok(page) => {
            if let Err(e) = page.quit().await {
                warn!("Failed to close WebDriver session: {}", e);
            }
        }
        Err(_) => warn!("WebDriver session still in use; leaving it open"),
    }

    snapshot
}

async fn scrape_page(
    config: &Config,
    factory: &ScraperFactory,
    store: Store,
    page: Arc<WebDriverPage>,
    url: &str,
) -> Result<Option<ProductSnapshot>> {
    page.goto(url)
        .await
        .with_context(|| format!("Failed to load {}", url))?;

    let handle: Arc<dyn PageQuery> = page;
    let Some(scraper) = factory.resolve(store.name(), handle, config.selectors_for(store))? else {
        return Ok(None);
    };

    Ok(Some(capture(scraper.as_ref(), url).await))
}
