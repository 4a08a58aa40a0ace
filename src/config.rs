use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::models::Store;
use crate::monitor::WatchRule;
use crate::parsers::is_valid_trendyol_url;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_seconds: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Store name to selector JSON, replacing the built-in selectors.
    #[serde(default)]
    pub selector_overrides: HashMap<String, String>,
    #[serde(default)]
    pub products: Vec<TrackedProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedProduct {
    pub url: String,
    /// Detected from the URL when absent.
    pub store: Option<String>,
    pub size: Option<String>,
    pub threshold: Option<f64>,
}

impl TrackedProduct {
    pub fn store_name(&self) -> Option<String> {
        self.store
            .clone()
            .or_else(|| Store::from_url(&self.url).map(|store| store.name().to_string()))
    }

    /// Store this product is tracked on, `None` when unsupported. Fails when
    /// the URL is not a product detail page of that store.
    pub fn resolve_store(&self) -> Result<Option<Store>> {
        let Some(store) = self.store_name().as_deref().and_then(Store::from_name) else {
            return Ok(None);
        };

        if store == Store::Trendyol && !is_valid_trendyol_url(&self.url) {
            bail!("{} is not a Trendyol product page", self.url);
        }

        Ok(Some(store))
    }

    pub fn rule(&self) -> WatchRule {
        WatchRule {
            size: self.size.clone(),
            threshold: self.threshold,
        }
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_check_interval() -> u64 {
    900
}

fn default_wait_timeout() -> u64 {
    10
}

fn default_max_sessions() -> usize {
    3
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Config {
    /// `price_tracker.{toml,json,yaml,...}` if present, then `PRICE_TRACKER_*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        Self::build(
            ::config::Config::builder()
                .add_source(::config::File::with_name("price_tracker").required(false))
                .add_source(::config::Environment::with_prefix("PRICE_TRACKER").separator("__")),
        )
    }

    pub fn from_toml(toml: &str) -> Result<Self> {
        Self::build(
            ::config::Config::builder()
                .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml)),
        )
    }

    fn build(builder: ::config::ConfigBuilder<::config::builder::DefaultState>) -> Result<Self> {
        let config: Config = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(config)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_seconds)
    }

    /// Selector JSON for a store: the configured override or the built-in one.
    pub fn selectors_for(&self, store: Store) -> &str {
        // `config` lowercases keys, so match store names case-insensitively.
        self.selector_overrides
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(store.name()))
            .map(|(_, json)| json.as_str())
            .unwrap_or_else(|| store.default_selectors())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_file() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.webdriver_url, "http://localhost:9515");
        assert!(config.headless);
        assert_eq!(config.check_interval_seconds, 900);
        assert_eq!(config.wait_timeout(), Duration::from_secs(10));
        assert_eq!(config.max_sessions, 3);
        assert!(config.products.is_empty());
    }

    #[test]
    fn reads_products_and_overrides() {
        let config = Config::from_toml(
            r#"
            wait_timeout_seconds = 5

            [selector_overrides]
            Bershka = '{"price": ".new-price"}'

            [[products]]
            url = "https://www.trendyol.com/mavi/jean-p-42"
            size = "M"
            threshold = 499.9

            [[products]]
            url = "https://example.com/item"
            store = "Zara"
            "#,
        )
        .unwrap();

        assert_eq!(config.wait_timeout(), Duration::from_secs(5));
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].store_name().as_deref(), Some("Trendyol"));
        assert_eq!(
            config.products[0].rule(),
            WatchRule {
                size: Some("M".to_string()),
                threshold: Some(499.9)
            }
        );
        assert_eq!(config.products[1].store_name().as_deref(), Some("Zara"));

        assert_eq!(config.selectors_for(Store::Bershka), r#"{"price": ".new-price"}"#);
        assert_eq!(
            config.selectors_for(Store::Trendyol),
            Store::Trendyol.default_selectors()
        );
    }

    fn product(url: &str, store: Option<&str>) -> TrackedProduct {
        TrackedProduct {
            url: url.to_string(),
            store: store.map(str::to_string),
            size: None,
            threshold: None,
        }
    }

    #[test]
    fn trendyol_products_need_a_detail_page() {
        let listing = product("https://www.trendyol.com/erkek-jean-x-g2-c119", None);
        let err = listing.resolve_store().unwrap_err();
        assert!(err.to_string().contains("not a Trendyol product page"), "{}", err);

        let named = product("https://www.trendyol.com/", Some("Trendyol"));
        assert!(named.resolve_store().is_err());

        let detail = product("https://www.trendyol.com/mavi/jean-p-42", None);
        assert_eq!(detail.resolve_store().unwrap(), Some(Store::Trendyol));
    }

    #[test]
    fn other_stores_are_not_url_checked() {
        let bershka = product("https://www.bershka.com/tr/ceket-c0p1.html", None);
        assert_eq!(bershka.resolve_store().unwrap(), Some(Store::Bershka));

        let unknown = product("https://example.com/item", None);
        assert_eq!(unknown.resolve_store().unwrap(), None);
    }
}
