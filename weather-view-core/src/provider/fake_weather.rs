use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::model::{LocationCandidate, WeatherSnapshot};

use super::WeatherFetcher;

/// Returns the canned forecast, relabelled with the requested location.
#[derive(Debug, Clone, Default)]
pub struct FakeWeatherFetcher {
    latency: Duration,
}

impl FakeWeatherFetcher {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl WeatherFetcher for FakeWeatherFetcher {
    async fn fetch_weather(&self, candidate: &LocationCandidate) -> Result<WeatherSnapshot> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        tracing::debug!(location = %candidate, "fake weather fetch");
        WeatherSnapshot::fetched_for(candidate)
            .with_context(|| format!("Failed to build weather for {candidate}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_is_derived_from_candidate() {
        let fetcher = FakeWeatherFetcher::default();
        let candidate = LocationCandidate::new("Paris", "France");

        let snapshot = fetcher.fetch_weather(&candidate).await.expect("fake fetch never fails");

        assert_eq!(snapshot.location.name.as_deref(), Some("Paris"));
        assert_eq!(snapshot.location.country.as_deref(), Some("France"));
        assert_eq!(snapshot.current.wind_kph, Some(22.0));
        assert_eq!(snapshot.days().len(), 3);
    }
}
