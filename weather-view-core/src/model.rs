use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const INITIAL_SNAPSHOT_JSON: &str = include_str!("../fixtures/novosibirsk.json");
const FETCHED_SNAPSHOT_JSON: &str = include_str!("../fixtures/fetched.json");

/// A location returned by search, not yet selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub country: String,
}

impl LocationCandidate {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self { name: name.into(), country: country.into() }
    }
}

impl std::fmt::Display for LocationCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

/// The complete weather payload for one location.
///
/// Shaped after weatherapi.com's `forecast.json`. Every leaf is optional; fallbacks are
/// applied when view models are built, see [`crate::view`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub location: Location,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub condition: Condition,
    pub temp_c: Option<f64>,
    pub wind_kph: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub forecastday: Vec<DayForecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayForecast {
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    pub day: DaySummary,
    pub astro: Astro,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaySummary {
    pub condition: Condition,
    pub maxtemp_c: Option<f64>,
    pub maxwind_kph: Option<f64>,
    pub avghumidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Astro {
    pub sunrise: Option<String>,
}

impl WeatherSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse weather snapshot JSON")
    }

    /// Snapshot shown before the user has picked any location.
    pub fn initial() -> Result<Self> {
        Self::from_json(INITIAL_SNAPSHOT_JSON).context("Built-in initial snapshot is malformed")
    }

    /// Canned payload returned by the fake fetcher, relabelled for `candidate`.
    pub fn fetched_for(candidate: &LocationCandidate) -> Result<Self> {
        let mut snapshot =
            Self::from_json(FETCHED_SNAPSHOT_JSON).context("Built-in fetch template is malformed")?;

        snapshot.location = Location {
            name: Some(candidate.name.clone()),
            country: Some(candidate.country.clone()),
        };

        Ok(snapshot)
    }

    pub fn days(&self) -> &[DayForecast] {
        &self.forecast.forecastday
    }

    pub fn day(&self, index: usize) -> Option<&DayForecast> {
        self.forecast.forecastday.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_snapshot_is_novosibirsk() {
        let snapshot = WeatherSnapshot::initial().expect("fixture must parse");

        assert_eq!(snapshot.location.name.as_deref(), Some("Novosibirsk"));
        assert_eq!(snapshot.location.country.as_deref(), Some("Russia"));
        assert_eq!(snapshot.current.temp_c, Some(25.0));
        assert_eq!(snapshot.days().len(), 3);
        assert_eq!(snapshot.days()[0].date, "2023-07-30");
        assert_eq!(snapshot.days()[0].astro.sunrise.as_deref(), Some("05:30 AM"));
    }

    #[test]
    fn fetched_snapshot_takes_candidate_location() {
        let candidate = LocationCandidate::new("London", "UK");
        let snapshot = WeatherSnapshot::fetched_for(&candidate).expect("fixture must parse");

        assert_eq!(snapshot.location.name.as_deref(), Some("London"));
        assert_eq!(snapshot.location.country.as_deref(), Some("UK"));
        assert_eq!(snapshot.current.temp_c, Some(27.0));
        assert_eq!(snapshot.days()[2].date, "2023-08-04");
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let snapshot =
            WeatherSnapshot::from_json(r#"{"forecast":{"forecastday":[{"date":"2023-07-30"}]}}"#)
                .expect("partial payload must parse");

        assert_eq!(snapshot.current.temp_c, None);
        assert_eq!(snapshot.location.name, None);
        assert_eq!(snapshot.days()[0].day.maxtemp_c, None);
        assert_eq!(snapshot.days()[0].astro.sunrise, None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = WeatherSnapshot::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse weather snapshot JSON"));
    }

    #[test]
    fn candidate_display_joins_name_and_country() {
        assert_eq!(LocationCandidate::new("Paris", "France").to_string(), "Paris, France");
    }
}
