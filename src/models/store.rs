use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Every storefront the factory knows about. Lookups by name are exact and
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Store {
    Trendyol,
    Bershka,
    Zara,
}

impl Store {
    pub const ALL: [Store; 3] = [Store::Trendyol, Store::Bershka, Store::Zara];

    pub fn name(&self) -> &'static str {
        match self {
            Store::Trendyol => "Trendyol",
            Store::Bershka => "Bershka",
            Store::Zara => "Zara",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Trendyol" => Some(Store::Trendyol),
            "Bershka" => Some(Store::Bershka),
            "Zara" => Some(Store::Zara),
            _ => None,
        }
    }

    /// Registrable domain of the storefront.
    pub fn host(&self) -> &'static str {
        match self {
            Store::Trendyol => "trendyol.com",
            Store::Bershka => "bershka.com",
            Store::Zara => "zara.com",
        }
    }

    /// Detect the store from a product URL. Subdomains of the store host match.
    pub fn from_url(product_url: &str) -> Option<Self> {
        let parsed = Url::parse(product_url).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();

        Store::ALL.into_iter().find(|store| {
            let domain = store.host();
            host == domain || host.ends_with(&format!(".{}", domain))
        })
    }

    /// Built-in selector configuration, in the same JSON form callers pass
    /// to the factory.
    pub fn default_selectors(&self) -> &'static str {
        match self {
            Store::Trendyol => {
                r#"{
                    "price": ".prc-dsc, .prc-slg, .price-box",
                    "size_available": "div.sp-itm:not(.so)",
                    "size_unavailable": "div.sp-itm.so"
                }"#
            }
            Store::Bershka => {
                r#"{
                    "price": {"by": "class_name", "value": "current-price-elem"},
                    "size_available": ".size-selector-option:not(.disabled)",
                    "size_unavailable": ".size-selector-option.disabled"
                }"#
            }
            // Selectors not known yet; the scraper is a reserved placeholder.
            Store::Zara => "{}",
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
