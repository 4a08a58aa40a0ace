use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::ScraperError;

/// Logical field names understood by the extraction engine.
pub mod fields {
    pub const PRICE: &str = "price";
    pub const SIZE_AVAILABLE: &str = "size_available";
    pub const SIZE_UNAVAILABLE: &str = "size_unavailable";
}

/// How a selector string is interpreted by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryDialect {
    ClassName,
    Css,
    #[serde(rename = "xpath")]
    XPath,
}

impl fmt::Display for QueryDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryDialect::ClassName => write!(f, "class name"),
            QueryDialect::Css => write!(f, "css"),
            QueryDialect::XPath => write!(f, "xpath"),
        }
    }
}

/// A DOM query: a selector tagged with its dialect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Query {
    pub by: QueryDialect,
    pub value: String,
}

impl Query {
    pub fn css(value: impl Into<String>) -> Self {
        Self {
            by: QueryDialect::Css,
            value: value.into(),
        }
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Self {
            by: QueryDialect::ClassName,
            value: value.into(),
        }
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            by: QueryDialect::XPath,
            value: value.into(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.by, self.value)
    }
}

// A bare string is a CSS selector; the object form names its dialect.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuery {
    Css(String),
    Tagged { by: QueryDialect, value: String },
}

impl From<RawQuery> for Query {
    fn from(raw: RawQuery) -> Self {
        match raw {
            RawQuery::Css(value) => Query::css(value),
            RawQuery::Tagged { by, value } => Query { by, value },
        }
    }
}

/// Per-store mapping from logical field name to query. Immutable once built;
/// absent fields are allowed and make the matching operation fail softly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorConfig {
    queries: HashMap<String, Query>,
}

impl SelectorConfig {
    pub fn from_json(json: &str) -> Result<Self, ScraperError> {
        let raw: HashMap<String, RawQuery> = serde_json::from_str(json)?;
        let queries: HashMap<String, Query> = raw
            .into_iter()
            .map(|(field, query)| (field, Query::from(query)))
            .collect();

        Self::from_queries(queries)
    }

    pub fn from_queries<I>(queries: I) -> Result<Self, ScraperError>
    where
        I: IntoIterator<Item = (String, Query)>,
    {
        let mut map = HashMap::new();
        for (field, mut query) in queries {
            query.value = query.value.trim().to_string();
            if query.value.is_empty() {
                return Err(ScraperError::EmptySelector { field });
            }
            map.insert(field, query);
        }

        Ok(Self { queries: map })
    }

    pub fn get(&self, field: &str) -> Option<&Query> {
        self.queries.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Store;

    #[test]
    fn parses_plain_and_tagged_entries() {
        let config = SelectorConfig::from_json(
            r#"{"price": {"by": "class_name", "value": "prc-dsc"}, "size_available": "div.sp-itm:not(.so)"}"#,
        )
        .unwrap();

        assert_eq!(config.get(fields::PRICE), Some(&Query::class_name("prc-dsc")));
        assert_eq!(
            config.get(fields::SIZE_AVAILABLE),
            Some(&Query::css("div.sp-itm:not(.so)"))
        );
        assert_eq!(config.get(fields::SIZE_UNAVAILABLE), None);
    }

    #[test]
    fn accepts_xpath_dialect() {
        let config =
            SelectorConfig::from_json(r#"{"price": {"by": "xpath", "value": "//span[@class='p']"}}"#)
                .unwrap();
        assert_eq!(config.get("price").map(|q| q.by), Some(QueryDialect::XPath));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            SelectorConfig::from_json("{\"price\": "),
            Err(ScraperError::InvalidSelectors(_))
        ));
        assert!(matches!(
            SelectorConfig::from_json("[\"price\"]"),
            Err(ScraperError::InvalidSelectors(_))
        ));
        assert!(matches!(
            SelectorConfig::from_json(r#"{"price": {"by": "id", "value": "x"}}"#),
            Err(ScraperError::InvalidSelectors(_))
        ));
    }

    #[test]
    fn rejects_blank_selector() {
        match SelectorConfig::from_json(r#"{"price": "   "}"#) {
            Err(ScraperError::EmptySelector { field }) => assert_eq!(field, "price"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn empty_object_is_valid() {
        let config = SelectorConfig::from_json("{}").unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn store_defaults_are_valid() {
        for store in Store::ALL {
            assert!(SelectorConfig::from_json(store.default_selectors()).is_ok());
        }
        let trendyol = SelectorConfig::from_json(Store::Trendyol.default_selectors()).unwrap();
        assert_eq!(trendyol.len(), 3);
    }
}
