use std::fmt;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::ExtractionFailure;
use crate::models::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Price,
    Sizes,
    UnavailableSizes,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Price => write!(f, "price"),
            Operation::Sizes => write!(f, "sizes"),
            Operation::UnavailableSizes => write!(f, "unavailable sizes"),
        }
    }
}

/// A recovered extraction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionEvent {
    pub store: Store,
    pub operation: Operation,
    pub failure: ExtractionFailure,
}

/// Receives every failure a scraper swallows. Injected at construction.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: ExtractionEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: ExtractionEvent) {
        match event.failure {
            // Sold-out pages legitimately match nothing.
            ExtractionFailure::NoMatches { .. } => debug!(
                store = %event.store,
                operation = %event.operation,
                "{}", event.failure
            ),
            _ => warn!(
                store = %event.store,
                operation = %event.operation,
                "Error getting {} {}: {}", event.store, event.operation, event.failure
            ),
        }
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ExtractionEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ExtractionEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl DiagnosticsSink for MemorySink {
    fn record(&self, event: ExtractionEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
