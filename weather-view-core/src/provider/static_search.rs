use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::model::LocationCandidate;

use super::LocationSearch;

/// Answers every query with the same fixed list of cities, in a fixed order.
#[derive(Debug, Clone)]
pub struct StaticLocationSearch {
    candidates: Vec<LocationCandidate>,
    latency: Duration,
}

impl Default for StaticLocationSearch {
    fn default() -> Self {
        Self::new(vec![
            LocationCandidate::new("New York", "USA"),
            LocationCandidate::new("London", "UK"),
            LocationCandidate::new("Paris", "France"),
        ])
    }
}

impl StaticLocationSearch {
    pub fn new(candidates: Vec<LocationCandidate>) -> Self {
        Self { candidates, latency: Duration::ZERO }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl LocationSearch for StaticLocationSearch {
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        tracing::debug!(query, results = self.candidates.len(), "static location search");
        Ok(self.candidates.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_fixed_list_in_order() {
        let search = StaticLocationSearch::default();

        let names: Vec<_> = search
            .search("anything")
            .await
            .expect("static search never fails")
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, ["New York", "London", "Paris"]);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_the_answer() {
        let search = StaticLocationSearch::default().with_latency(Duration::from_millis(300));
        let started = tokio::time::Instant::now();

        search.search("Par").await.expect("static search never fails");

        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
