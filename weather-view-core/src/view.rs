//! View models handed to the render layer.
//!
//! This is the one place where absent snapshot fields are resolved to fallbacks. Lookups that
//! miss the static asset tables leave the field empty and add a notice to the screen.

use serde::Serialize;

use crate::{
    assets::{self, ConditionAsset, DayLabels, DisplayLocale},
    controller::{Phase, SelectedDay, ViewState},
    error::{AssetKind, ViewError},
    format,
    model::{Condition, DayForecast, WeatherSnapshot},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub phase: &'static str,
    /// Label of the location being fetched, if any.
    pub loading: Option<String>,
    pub search: Option<SearchView>,
    pub current: Option<CurrentPanel>,
    pub forecast: Vec<ForecastTile>,
    pub detail: Option<DayDetail>,
    /// Non-fatal failure shown above the content.
    pub banner: Option<String>,
    pub notices: Vec<ViewError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub placeholder: &'static str,
    pub query: String,
    pub candidates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentPanel {
    pub location: String,
    pub country: String,
    pub image: Option<&'static str>,
    pub video: Option<&'static str>,
    pub temperature: Option<String>,
    pub description: Option<&'static str>,
    pub wind: Option<String>,
    pub humidity: Option<String>,
    pub sunrise: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastTile {
    pub index: usize,
    pub image: Option<&'static str>,
    pub day: Option<&'static str>,
    pub max_temp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub title: String,
    pub image: Option<&'static str>,
    pub description: Option<&'static str>,
    pub max_temp: Option<String>,
    pub wind: Option<String>,
    pub humidity: Option<String>,
    pub sunrise: Option<String>,
}

impl Screen {
    pub fn build(state: &ViewState, locale: DisplayLocale) -> Self {
        let mut builder = Builder { locale, notices: Vec::new() };
        let snapshot = state.snapshot.as_ref();

        let search = state.phase.query().map(|query| SearchView {
            placeholder: locale.search_placeholder(),
            query: query.to_owned(),
            candidates: state.phase.candidates().iter().map(ToString::to_string).collect(),
        });

        let current = snapshot.map(|s| builder.current(s));
        let forecast: Vec<ForecastTile> = snapshot
            .map(|s| s.days().iter().enumerate().map(|(i, d)| builder.tile(i, d)).collect())
            .unwrap_or_default();
        let detail = match (&state.phase, snapshot) {
            (Phase::DetailOpen { selected }, Some(s)) => builder.detail(s, selected),
            _ => None,
        };

        Screen {
            phase: state.phase.name(),
            loading: state.loading_candidate().map(ToString::to_string),
            search,
            current,
            forecast,
            detail,
            banner: state.phase.error().map(ToString::to_string),
            notices: builder.notices,
        }
    }
}

struct Builder {
    locale: DisplayLocale,
    notices: Vec<ViewError>,
}

impl Builder {
    fn current(&mut self, snapshot: &WeatherSnapshot) -> CurrentPanel {
        let asset = self.condition(&snapshot.current.condition);
        let current = &snapshot.current;

        CurrentPanel {
            location: snapshot.location.name.clone().unwrap_or_default(),
            country: snapshot.location.country.clone().unwrap_or_default(),
            image: asset.map(|a| a.image),
            video: asset.map(|a| a.video),
            temperature: current.temp_c.map(format::format_temp),
            description: asset.map(|a| a.description(self.locale)),
            wind: current.wind_kph.map(|kph| format::format_wind(kph, self.locale)),
            humidity: current.humidity.map(format::format_humidity),
            sunrise: snapshot.days().first().and_then(|d| d.astro.sunrise.clone()),
        }
    }

    fn tile(&mut self, index: usize, day: &DayForecast) -> ForecastTile {
        let asset = self.condition(&day.day.condition);
        let labels = self.day_labels(format::weekday_name(&day.date), &day.date);

        ForecastTile {
            index,
            image: asset.map(|a| a.image),
            day: labels.map(|l| l.short),
            max_temp: day.day.maxtemp_c.map(format::format_temp),
        }
    }

    fn detail(&mut self, snapshot: &WeatherSnapshot, selected: &SelectedDay) -> Option<DayDetail> {
        let day = snapshot.day(selected.index)?;
        let asset = self.condition(&day.day.condition);
        let labels = self.day_labels(selected.weekday, &day.date);

        let title = [labels.map(|l| l.full.to_owned()), format::short_date(&day.date, self.locale)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Some(DayDetail {
            title,
            image: asset.map(|a| a.image),
            description: asset.map(|a| a.description(self.locale)),
            max_temp: day.day.maxtemp_c.map(format::format_temp),
            wind: day.day.maxwind_kph.map(|kph| format::format_wind(kph, self.locale)),
            humidity: day.day.avghumidity.map(format::format_humidity),
            sunrise: day.astro.sunrise.clone(),
        })
    }

    fn condition(&mut self, condition: &Condition) -> Option<ConditionAsset> {
        let text = condition.text.as_deref()?;
        let asset = assets::condition_asset(text);

        if asset.is_none() {
            self.notice(ViewError::AssetMissing { kind: AssetKind::Condition, key: text.to_owned() });
        }
        asset
    }

    fn day_labels(&mut self, weekday: Option<&'static str>, date: &str) -> Option<DayLabels> {
        let Some(weekday) = weekday else {
            self.notice(ViewError::InvalidDate { date: date.to_owned() });
            return None;
        };

        let labels = assets::day_labels(weekday, self.locale);
        if labels.is_none() {
            self.notice(ViewError::AssetMissing { kind: AssetKind::DayName, key: weekday.to_owned() });
        }
        labels
    }

    fn notice(&mut self, error: ViewError) {
        if !self.notices.contains(&error) {
            self.notices.push(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ControllerSettings, Event, ViewController};

    fn controller_with(snapshot: WeatherSnapshot) -> ViewController {
        ViewController::new(ControllerSettings::default(), Some(snapshot))
    }

    fn initial() -> WeatherSnapshot {
        WeatherSnapshot::initial().expect("fixture must parse")
    }

    #[test]
    fn initial_screen_shows_novosibirsk() {
        let screen = Screen::build(controller_with(initial()).state(), DisplayLocale::Ru);

        let current = screen.current.expect("snapshot is loaded");
        assert_eq!(current.location, "Novosibirsk");
        assert_eq!(current.country, "Russia");
        assert_eq!(current.temperature.as_deref(), Some("25°"));
        assert_eq!(current.description, Some("Солнечно"));
        assert_eq!(current.wind.as_deref(), Some("5.56 м/с"));
        assert_eq!(current.humidity.as_deref(), Some("50%"));
        assert_eq!(current.sunrise.as_deref(), Some("05:30 AM"));

        assert_eq!(screen.phase, "displaying");
        assert!(screen.search.is_none());
        assert!(screen.detail.is_none());
        assert!(screen.notices.is_empty());
    }

    #[test]
    fn forecast_tiles_use_short_day_names() {
        let screen = Screen::build(controller_with(initial()).state(), DisplayLocale::Ru);

        let days: Vec<_> = screen.forecast.iter().map(|t| t.day).collect();
        assert_eq!(days, [Some("Вс"), Some("Пн"), Some("Вт")]);

        let temps: Vec<_> = screen.forecast.iter().map(|t| t.max_temp.clone()).collect();
        assert_eq!(temps, [Some("28°".into()), Some("26°".into()), Some("24°".into())]);
    }

    #[test]
    fn detail_for_first_day() {
        let mut ctl = controller_with(initial());
        ctl.update(Event::OpenDay(0));

        let detail = Screen::build(ctl.state(), DisplayLocale::Ru).detail.expect("modal is open");

        assert_eq!(detail.title, "Воскресенье, 30.07");
        assert_eq!(detail.max_temp.as_deref(), Some("28°"));
        assert_eq!(detail.wind.as_deref(), Some("6.94 м/с"));
        assert_eq!(detail.humidity.as_deref(), Some("40%"));
        assert_eq!(detail.sunrise.as_deref(), Some("05:30 AM"));
    }

    #[test]
    fn detail_in_english() {
        let mut ctl = controller_with(initial());
        ctl.update(Event::OpenDay(2));

        let detail = Screen::build(ctl.state(), DisplayLocale::En).detail.expect("modal is open");

        assert_eq!(detail.title, "Tuesday, 08/01");
        assert_eq!(detail.description, Some("Cloudy"));
        assert_eq!(detail.wind.as_deref(), Some("5 m/s"));
    }

    #[test]
    fn half_degrees_round_away_from_zero_on_screen() {
        let mut snapshot = initial();
        snapshot.forecast.forecastday[0].day.maxtemp_c = Some(28.5);
        snapshot.current.temp_c = Some(-3.5);

        let screen = Screen::build(controller_with(snapshot.clone()).state(), DisplayLocale::Ru);

        assert_eq!(screen.forecast[0].max_temp.as_deref(), Some("29°"));
        assert_eq!(screen.current.and_then(|c| c.temperature).as_deref(), Some("-4°"));
        // Display rounding never touches the stored value.
        assert_eq!(snapshot.forecast.forecastday[0].day.maxtemp_c, Some(28.5));
    }

    #[test]
    fn unknown_condition_is_blank_and_noticed_once() {
        let mut snapshot = initial();
        snapshot.current.condition.text = Some("Blizzard".into());
        snapshot.forecast.forecastday[1].day.condition.text = Some("Blizzard".into());

        let screen = Screen::build(controller_with(snapshot).state(), DisplayLocale::Ru);

        let current = screen.current.expect("snapshot is loaded");
        assert_eq!(current.image, None);
        assert_eq!(current.description, None);
        assert_eq!(screen.forecast[1].image, None);
        assert_eq!(
            screen.notices,
            vec![ViewError::AssetMissing { kind: AssetKind::Condition, key: "Blizzard".into() }]
        );
    }

    #[test]
    fn bad_date_blanks_day_name_and_is_noticed() {
        let mut snapshot = initial();
        snapshot.forecast.forecastday[2].date = "someday".into();

        let screen = Screen::build(controller_with(snapshot).state(), DisplayLocale::Ru);

        assert_eq!(screen.forecast[2].day, None);
        assert!(screen.notices.contains(&ViewError::InvalidDate { date: "someday".into() }));
    }

    #[test]
    fn missing_fields_render_as_empty() {
        let snapshot = WeatherSnapshot::default();

        let screen = Screen::build(controller_with(snapshot).state(), DisplayLocale::Ru);

        let current = screen.current.expect("snapshot is loaded");
        assert_eq!(current.location, "");
        assert_eq!(current.temperature, None);
        assert_eq!(current.wind, None);
        assert_eq!(current.sunrise, None);
        assert!(screen.forecast.is_empty());
        assert!(screen.notices.is_empty());
    }

    #[test]
    fn search_and_candidates_are_listed() {
        let mut ctl = controller_with(initial());
        ctl.update(Event::ToggleSearch);
        ctl.update(Event::QueryChanged("Lon".into()));
        ctl.update(Event::DebounceElapsed { token: 1 });
        ctl.update(Event::CandidatesLoaded {
            seq: 1,
            candidates: vec![crate::LocationCandidate::new("London", "UK")],
        });

        let search = Screen::build(ctl.state(), DisplayLocale::Ru).search.expect("search is open");

        assert_eq!(search.query, "Lon");
        assert_eq!(search.placeholder, "Выберите город");
        assert_eq!(search.candidates, ["London, UK"]);
    }

    #[test]
    fn error_phase_shows_banner() {
        let mut ctl = controller_with(initial());
        ctl.update(Event::ToggleSearch);
        ctl.update(Event::QueryChanged("Lon".into()));
        ctl.update(Event::DebounceElapsed { token: 1 });
        ctl.update(Event::LookupFailed { seq: 1, reason: "offline".into() });

        let screen = Screen::build(ctl.state(), DisplayLocale::En);

        assert_eq!(screen.phase, "error");
        assert_eq!(screen.banner.as_deref(), Some("Location search for 'Lon' failed: offline"));
        assert!(screen.current.is_some());
    }
}
