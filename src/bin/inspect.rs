use anyhow::{bail, Context, Result};
use std::sync::Arc;

use price_tracker::config::Config;
use price_tracker::models::{SelectorConfig, Store};
use price_tracker::page::HtmlPage;
use price_tracker::scrapers::ScraperFactory;
use price_tracker::utils::http::{create_client, fetch_product_page};

/// Fetch a product page over plain HTTP and run its store scraper against it.
/// Useful for checking selectors without a browser; pages that render prices
/// with JavaScript will report the sentinels.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("price_tracker=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let (store, url) = match (args.next(), args.next()) {
        (Some(name), Some(url)) => match Store::from_name(&name) {
            Some(store) => (store, url),
            None => bail!("Unsupported store: {}", name),
        },
        (Some(url), None) => match Store::from_url(&url) {
            Some(store) => (store, url),
            None => bail!("Cannot detect the store of {}; pass it explicitly", url),
        },
        _ => bail!("usage: inspect [<store>] <url>"),
    };

    let config = Config::load()?;
    let client = create_client(&config.user_agent)?;

    println!("Fetching {}...", url);
    let html = fetch_product_page(&client, store, &url, 3).await?;
    if let Ok(path) = std::env::var("INSPECT_SAVE_HTML") {
        std::fs::write(&path, &html).with_context(|| format!("Failed to write {}", path))?;
        println!("Saved page to {}", path);
    }

    let factory = ScraperFactory::new().with_wait_timeout(config.wait_timeout());
    let page = Arc::new(HtmlPage::new(html));
    let scraper = factory.build(store, page, SelectorConfig::from_json(config.selectors_for(store))?);

    let sizes = scraper.get_sizes().await;
    println!("Store:             {}", scraper.store());
    println!("Price:             {:.2}", scraper.get_price().await);
    println!("Available sizes:   {}", sizes.join(", "));
    println!("Unavailable sizes: {}", scraper.get_unavailable_sizes().await.join(", "));
    println!("In stock:          {}", scraper.is_in_stock().await);

    Ok(())
}
