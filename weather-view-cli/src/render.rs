//! Plain-text rendering of a [`Screen`].

use std::fmt::{self, Write};

use weather_view_core::view::{CurrentPanel, DayDetail, ForecastTile, Screen, SearchView};

const BLANK: &str = "-";

pub fn render(screen: &Screen) -> String {
    Rendered(screen).to_string()
}

/// Text form of a screen, one block per panel.
struct Rendered<'a>(&'a Screen);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let screen = self.0;

        if let Some(banner) = &screen.banner {
            writeln!(f, "! {banner}")?;
        }

        // While a location is loading the spinner replaces everything else.
        if screen.phase == "loading" {
            if let Some(label) = &screen.loading {
                writeln!(f, "Loading {label}...")?;
            }
            return Ok(());
        }

        if let Some(search) = &screen.search {
            write_search(f, search)?;
        }

        match &screen.current {
            Some(current) => write_current(f, current)?,
            None => writeln!(f, "No location selected.")?,
        }

        if !screen.forecast.is_empty() {
            write_forecast(f, &screen.forecast)?;
        }

        if let Some(detail) = &screen.detail {
            write_detail(f, detail)?;
        }

        if !screen.notices.is_empty() {
            writeln!(f, "\nNotices:")?;
            for notice in &screen.notices {
                writeln!(f, "  - {notice}")?;
            }
        }

        Ok(())
    }
}

fn write_search(f: &mut fmt::Formatter<'_>, search: &SearchView) -> fmt::Result {
    let query = if search.query.is_empty() { search.placeholder } else { search.query.as_str() };
    writeln!(f, "Search: {query}")?;

    for (index, candidate) in search.candidates.iter().enumerate() {
        writeln!(f, "  [{index}] {candidate}")?;
    }
    f.write_char('\n')
}

fn write_current(f: &mut fmt::Formatter<'_>, current: &CurrentPanel) -> fmt::Result {
    writeln!(f, "{}, {}", current.location, current.country)?;
    writeln!(
        f,
        "  {}  {}",
        current.temperature.as_deref().unwrap_or(BLANK),
        current.description.unwrap_or_default(),
    )?;
    writeln!(
        f,
        "  wind {} | humidity {} | sunrise {}",
        current.wind.as_deref().unwrap_or(BLANK),
        current.humidity.as_deref().unwrap_or(BLANK),
        current.sunrise.as_deref().unwrap_or(BLANK),
    )
}

fn write_forecast(f: &mut fmt::Formatter<'_>, tiles: &[ForecastTile]) -> fmt::Result {
    f.write_str("\nForecast:\n ")?;
    for (n, tile) in tiles.iter().enumerate() {
        let gap = if n == 0 { " " } else { "   " };
        write!(
            f,
            "{gap}[{}] {} {}",
            tile.index,
            tile.day.unwrap_or(BLANK),
            tile.max_temp.as_deref().unwrap_or(BLANK)
        )?;
    }
    f.write_char('\n')
}

fn write_detail(f: &mut fmt::Formatter<'_>, detail: &DayDetail) -> fmt::Result {
    writeln!(f, "\n+-- {} --+", detail.title)?;
    if let Some(description) = detail.description {
        writeln!(f, "  {description}")?;
    }
    writeln!(f, "  {}", detail.max_temp.as_deref().unwrap_or(BLANK))?;
    writeln!(
        f,
        "  wind {} | humidity {} | sunrise {}",
        detail.wind.as_deref().unwrap_or(BLANK),
        detail.humidity.as_deref().unwrap_or(BLANK),
        detail.sunrise.as_deref().unwrap_or(BLANK),
    )
}
