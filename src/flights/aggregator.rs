use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{error, info, warn};
use thiserror::Error;

use crate::config::GDS_SOURCES;
use crate::flights::model::{Flight, SearchParams};
use crate::flights::source::{FlightSource, MockGdsSource};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no flight sources configured")]
    NoSources,
}

/// Fans one search request out to every configured source in parallel and
/// merges whatever comes back, in completion order.
pub struct FlightAggregator {
    sources: Vec<Arc<dyn FlightSource>>,
}

impl FlightAggregator {
    pub fn new(sources: Vec<Arc<dyn FlightSource>>) -> Self {
        Self { sources }
    }

    pub fn with_mock_sources() -> Self {
        let sources = GDS_SOURCES
            .iter()
            .map(|name| Arc::new(MockGdsSource::new(*name)) as Arc<dyn FlightSource>)
            .collect();
        Self::new(sources)
    }

    /// Queries all sources concurrently and returns once every one of them
    /// has finished. A failing source contributes zero flights; the result
    /// is an error only when no source could be dispatched at all.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Flight>, SearchError> {
        if self.sources.is_empty() {
            return Err(SearchError::NoSources);
        }

        let mut tasks: FuturesUnordered<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = source.clone();
                let params = params.clone();

                tokio::spawn(async move {
                    let name = source.name().to_string();
                    (name, source.fetch(&params).await)
                })
            })
            .collect();

        // Barrier: every source finishes before the merged result is
        // returned. Results land in completion order.
        let mut flights = Vec::new();
        while let Some(joined) = tasks.next().await {
            match joined {
                Ok((_, Ok(source_flights))) => flights.extend(source_flights),
                Ok((name, Err(e))) => {
                    warn!("Source {} failed, continuing without it: {}", name, e);
                }
                Err(e) => {
                    // A panicking source must not take the search down with it
                    error!("Source task aborted: {}", e);
                }
            }
        }

        info!(
            "Aggregated {} flights from {} sources for {} -> {}",
            flights.len(),
            self.sources.len(),
            params.origin,
            params.destination
        );

        Ok(flights)
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}
