use anyhow::{anyhow, Context, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::models::Store;

pub fn create_client(user_agent: &str) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(25))
        .cookie_store(true)
        .build()?;

    Ok(client)
}

/// Download the static HTML of a product page. Transport errors and non-2xx
/// answers are retried with exponential back-off, up to `max_retries` tries.
pub async fn fetch_product_page(
    client: &Client,
    store: Store,
    url: &str,
    max_retries: u32,
) -> Result<String> {
    let mut last_error = anyhow!("no request was made");

    for attempt in 1..=max_retries {
        let response = client.get(url).send().await.and_then(|r| r.error_for_status());
        match response {
            Ok(response) => {
                return response
                    .text()
                    .await
                    .with_context(|| format!("Failed to read {} product page {}", store, url));
            }
            Err(e) => {
                warn!("{} product page {} failed (attempt {}/{}): {}", store, url, attempt, max_retries, e);
                last_error = e.into();
            }
        }

        if attempt < max_retries {
            let delay = Duration::from_secs(2u64.pow(attempt));
            debug!("Retrying {} in {:?}", url, delay);
            sleep(delay).await;
        }
    }

    Err(last_error.context(format!(
        "Could not fetch {} product page {} after {} attempts",
        store, url, max_retries
    )))
}
