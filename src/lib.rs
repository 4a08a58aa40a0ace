//! Price and stock tracking for online storefronts.
//!
//! A [`scrapers::ScraperFactory`] turns a store name, a page handle and the
//! store's selector configuration into a [`scrapers::StoreScraper`]. Scrapers
//! never fail: unreadable prices come back as [`models::PRICE_UNAVAILABLE`]
//! and unreadable sizes as an empty list, with the cause sent to the
//! injected [`diagnostics::DiagnosticsSink`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod models;
pub mod monitor;
pub mod page;
pub mod parsers;
pub mod scrapers;
pub mod utils;

pub use error::{ExtractionFailure, PriceParseError, QueryError, ScraperError};
