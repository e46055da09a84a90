//! Search provider integrations.
//!
//! A [`SearchProvider`] executes one [`Query`] asynchronously and resolves
//! exactly once with a [`SearchOutcome`]. Providers know nothing about
//! sequence numbers or map state; the coordinator layers staleness handling
//! on top.
//!
//! Two implementations ship with the crate:
//! - [`fixture::FixtureProvider`]: deterministic in-memory gazetteer, used by
//!   tests and the default CLI path.
//! - [`nominatim::NominatimProvider`]: the public OSM Nominatim HTTP API.

pub mod fixture;
pub mod nominatim;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::model::ResultItem;
use crate::query::Query;

/// Terminal provider failures. Surfaced to the UI as-is, never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("provider transport failed: {0}")]
    Transport(String),

    #[error("provider returned malformed data: {0}")]
    Decode(String),

    #[error("provider rejected the request: {code}")]
    Rejected { code: String },

    #[error("provider did not respond in time")]
    Timeout,
}

/// Result of one executed query: items in provider order, or a terminal error.
pub type SearchOutcome = Result<Vec<ResultItem>, ProviderError>;

/// Boxed future so providers stay object-safe behind `Arc<dyn SearchProvider>`.
pub type ProviderFuture = Pin<Box<dyn Future<Output = SearchOutcome> + Send + 'static>>;

/// An asynchronous search backend.
pub trait SearchProvider: Send + Sync + 'static {
    /// Execute the query. The returned future resolves exactly once.
    fn execute(&self, query: Query) -> ProviderFuture;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
