use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::diagnostics::{DiagnosticsSink, ExtractionEvent, Operation};
use crate::error::{ExtractionFailure, QueryError};
use crate::models::{fields, SelectorConfig, Store, PRICE_UNAVAILABLE};
use crate::page::PageQuery;
use crate::parsers::{parse_price, PriceFormat};

/// Selector-driven extraction shared by the store strategies. Holds one page
/// handle and one selector configuration; every call queries the page again.
pub struct PageExtractor {
    store: Store,
    page: Arc<dyn PageQuery>,
    selectors: SelectorConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
    wait_timeout: Duration,
}

impl PageExtractor {
    pub fn new(
        store: Store,
        page: Arc<dyn PageQuery>,
        selectors: SelectorConfig,
        diagnostics: Arc<dyn DiagnosticsSink>,
        wait_timeout: Duration,
    ) -> Self {
        Self {
            store,
            page,
            selectors,
            diagnostics,
            wait_timeout,
        }
    }

    /// Price from the `price` field, or `PRICE_UNAVAILABLE` on any failure.
    pub async fn price(&self, format: &PriceFormat) -> f64 {
        match self.try_price(format).await {
            Ok(price) => price,
            Err(failure) => {
                self.report(Operation::Price, failure);
                PRICE_UNAVAILABLE
            }
        }
    }

    /// Trimmed label of every element matching `field`, in page order. Blank
    /// labels are kept: hidden elements report empty text but still match.
    pub async fn labels(&self, operation: Operation, field: &'static str) -> Vec<String> {
        match self.try_labels(field).await {
            Ok(labels) => labels,
            Err(failure) => {
                self.report(operation, failure);
                Vec::new()
            }
        }
    }

    async fn try_price(&self, format: &PriceFormat) -> Result<f64, ExtractionFailure> {
        let query = self
            .selectors
            .get(fields::PRICE)
            .ok_or(ExtractionFailure::MissingSelector { field: fields::PRICE })?;

        // Hard cap in case the handle ignores its own timeout.
        let element = match timeout(self.wait_timeout, self.page.wait_for(query, self.wait_timeout)).await {
            Ok(found) => found?.ok_or(ExtractionFailure::NotFound { field: fields::PRICE })?,
            Err(_) => return Err(QueryError::Timeout(self.wait_timeout).into()),
        };

        let text = element.text().await?;
        Ok(parse_price(&text, format)?)
    }

    async fn try_labels(&self, field: &'static str) -> Result<Vec<String>, ExtractionFailure> {
        let query = self
            .selectors
            .get(field)
            .ok_or(ExtractionFailure::MissingSelector { field })?;

        let elements = self.page.find_all(query).await?;
        if elements.is_empty() {
            return Err(ExtractionFailure::NoMatches { field });
        }

        let mut labels = Vec::with_capacity(elements.len());
        for element in elements {
            labels.push(element.text().await?.trim().to_string());
        }

        Ok(labels)
    }

    fn report(&self, operation: Operation, failure: ExtractionFailure) {
        self.diagnostics.record(ExtractionEvent {
            store: self.store,
            operation,
            failure,
        });
    }
}
