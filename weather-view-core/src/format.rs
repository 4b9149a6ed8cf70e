//! Pure display formatting: units, rounding and weekday derivation.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::assets::DisplayLocale;

/// Converts km/h to m/s, rounded to two decimals.
pub fn kph_to_mps(kph: f64) -> f64 {
    (kph * 1000.0 / 3600.0 * 100.0).round() / 100.0
}

/// Rounds half away from zero, so `28.5 -> 29` and `-28.5 -> -29`.
pub fn round_temp(celsius: f64) -> i64 {
    celsius.round() as i64
}

pub fn format_temp(celsius: f64) -> String {
    format!("{}°", round_temp(celsius))
}

/// `20.0 -> "5.56 м/с"`. Trailing zeros are dropped (`18.0 -> "5 м/с"`).
pub fn format_wind(kph: f64, locale: DisplayLocale) -> String {
    format!("{} {}", kph_to_mps(kph), locale.speed_unit())
}

pub fn format_humidity(percent: f64) -> String {
    format!("{percent}%")
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// English weekday name of an ISO date, independent of the display locale.
pub fn weekday_name(date: &str) -> Option<&'static str> {
    let name = match parse_date(date)?.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };

    Some(name)
}

/// Day and month without the year: `30.07` (ru) or `07/30` (en).
pub fn short_date(date: &str, locale: DisplayLocale) -> Option<String> {
    let parsed = parse_date(date)?;
    let pattern = match locale {
        DisplayLocale::Ru => "%d.%m",
        DisplayLocale::En => "%m/%d",
    };

    Some(parsed.format(pattern).to_string())
}
