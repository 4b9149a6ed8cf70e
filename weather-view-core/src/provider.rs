use crate::{Config, LocationCandidate, WeatherSnapshot};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod fake_weather;
pub mod static_search;

pub use fake_weather::FakeWeatherFetcher;
pub use static_search::StaticLocationSearch;

/// Resolves free text typed into the search box to location candidates.
///
/// Implementations may be slow; the session aborts a lookup task once a newer one starts.
#[async_trait]
pub trait LocationSearch: Send + Sync + Debug {
    async fn search(&self, query: &str) -> anyhow::Result<Vec<LocationCandidate>>;
}

/// Loads the weather snapshot for a chosen candidate.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_weather(&self, candidate: &LocationCandidate) -> anyhow::Result<WeatherSnapshot>;
}

/// The pair of collaborators a session talks to.
#[derive(Debug, Clone)]
pub struct Providers {
    pub search: Arc<dyn LocationSearch>,
    pub weather: Arc<dyn WeatherFetcher>,
}

impl Providers {
    pub fn new(search: Arc<dyn LocationSearch>, weather: Arc<dyn WeatherFetcher>) -> Self {
        Self { search, weather }
    }
}

/// Construct the built-in collaborators, honouring the configured latency.
pub fn providers_from_config(config: &Config) -> Providers {
    let latency = config.fake_latency();

    Providers {
        search: Arc::new(StaticLocationSearch::default().with_latency(latency)),
        weather: Arc::new(FakeWeatherFetcher::default().with_latency(latency)),
    }
}
