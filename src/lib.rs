//! Async place-search coordination for map UIs.
//!
//! One query is in flight at a time; completions are tagged with a sequence
//! number and anything superseded is dropped, so the map's annotations always
//! reflect the latest completed query and nothing else.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod geo;
pub mod model;
pub mod providers;
pub mod query;
pub mod render;
pub mod signals;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::cli::{Cli, ProviderArg};
use crate::config::AppConfig;
use crate::coordinator::{QueryCoordinator, runtime};
use crate::providers::SearchProvider;
use crate::providers::fixture::FixtureProvider;
use crate::providers::nominatim::NominatimProvider;
use crate::render::TraceRenderer;
use crate::signals::{ChannelSink, UiSignal};

/// One-shot CLI flow: wire collaborators, submit the query, drain signals
/// until the search reaches a terminal state, print results.
pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let query = cli.to_query(&config)?;

    let provider: Arc<dyn SearchProvider> = match cli.provider {
        ProviderArg::Fixture => Arc::new(FixtureProvider::with_latency(config.fixture_latency())),
        ProviderArg::Nominatim => match &config.nominatim_base_url {
            Some(url) => Arc::new(NominatimProvider::with_base_url(url)),
            None => Arc::new(NominatimProvider::new()),
        },
    };
    info!(provider = provider.name(), kind = query.kind(), "starting search");

    let (sink, mut signals) = ChannelSink::new();
    let coordinator = QueryCoordinator::new(TraceRenderer::new(), sink, config.viewport_policy);
    let search = runtime::spawn(provider, coordinator, config.request_timeout());

    search.handle().submit(query);

    let mut outcome = Ok(());
    while let Some(signal) = signals.recv().await {
        match signal {
            UiSignal::LoadingStarted => {}
            UiSignal::EmptyInput => {
                outcome = Err(anyhow::anyhow!("query text is empty"));
                break;
            }
            UiSignal::EmptyResult => {
                println!("No matches.");
            }
            UiSignal::SearchFailed(err) => {
                outcome = Err(err.into());
            }
            UiSignal::ResultsReady(set) => {
                println!("{} result(s):", set.len());
                for (index, item) in set.items.iter().enumerate() {
                    match item.coordinate() {
                        Some(coordinate) => {
                            println!("{:>3}. {} {}", index + 1, item.display_name(), coordinate);
                        }
                        None => println!("{:>3}. {} (follow-up)", index + 1, item.display_name()),
                    }
                }
            }
            UiSignal::LoadingFinished => break,
        }
    }

    search.shutdown().await;
    outcome
}
