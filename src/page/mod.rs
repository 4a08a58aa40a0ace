//! Page-query capability injected into scrapers.
//!
//! The scraper layer only ever locates elements and reads their text. Session
//! creation, navigation and teardown belong to whoever owns the handle.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::QueryError;
use crate::models::Query;

mod html;
mod webdriver;

pub use html::HtmlPage;
pub use webdriver::WebDriverPage;

#[async_trait]
pub trait PageElement: Send + Sync {
    /// Text content of the element, trimmed.
    async fn text(&self) -> Result<String, QueryError>;
}

#[async_trait]
pub trait PageQuery: Send + Sync {
    /// Wait up to `timeout` for an element matching `query`.
    ///
    /// `Ok(None)` means the page answered that nothing matches; a page that
    /// gives up waiting returns `QueryError::Timeout`.
    async fn wait_for(
        &self,
        query: &Query,
        timeout: Duration,
    ) -> Result<Option<Box<dyn PageElement>>, QueryError>;

    /// All elements currently matching `query`, in document order.
    async fn find_all(&self, query: &Query) -> Result<Vec<Box<dyn PageElement>>, QueryError>;
}

/// Element whose text was captured when it was matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement(pub String);

#[async_trait]
impl PageElement for TextElement {
    async fn text(&self) -> Result<String, QueryError> {
        Ok(self.0.trim().to_string())
    }
}
