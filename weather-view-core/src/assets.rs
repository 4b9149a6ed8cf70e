//! Static lookup tables: condition text to display assets, weekday name to labels.
//!
//! A missing key is not an error here; callers get `None` and decide how to surface it.

use serde::{Deserialize, Serialize};

/// Language used for labels and descriptions on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLocale {
    #[default]
    Ru,
    En,
}

impl DisplayLocale {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayLocale::Ru => "ru",
            DisplayLocale::En => "en",
        }
    }

    pub const fn all() -> &'static [DisplayLocale] {
        &[DisplayLocale::Ru, DisplayLocale::En]
    }

    /// Unit suffix for wind speed.
    pub fn speed_unit(&self) -> &'static str {
        match self {
            DisplayLocale::Ru => "м/с",
            DisplayLocale::En => "m/s",
        }
    }

    pub fn search_placeholder(&self) -> &'static str {
        match self {
            DisplayLocale::Ru => "Выберите город",
            DisplayLocale::En => "Choose a city",
        }
    }
}

impl std::fmt::Display for DisplayLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DisplayLocale {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "ru" | "ru-ru" => Ok(DisplayLocale::Ru),
            "en" | "en-us" => Ok(DisplayLocale::En),
            _ => Err(anyhow::anyhow!("Unknown locale '{value}'. Supported locales: ru, en.")),
        }
    }
}

/// Display assets for one weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionAsset {
    pub image: &'static str,
    pub video: &'static str,
    description_ru: &'static str,
    description_en: &'static str,
}

impl ConditionAsset {
    pub fn description(&self, locale: DisplayLocale) -> &'static str {
        match locale {
            DisplayLocale::Ru => self.description_ru,
            DisplayLocale::En => self.description_en,
        }
    }
}

/// Short and full display forms of a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayLabels {
    pub short: &'static str,
    pub full: &'static str,
}

const fn asset(
    image: &'static str,
    video: &'static str,
    description_ru: &'static str,
    description_en: &'static str,
) -> ConditionAsset {
    ConditionAsset { image, video, description_ru, description_en }
}

/// Looks up assets by the provider's condition text, e.g. `"Partly cloudy"`.
pub fn condition_asset(text: &str) -> Option<ConditionAsset> {
    let found = match text {
        "Sunny" => asset("images/sun.png", "videos/sunny.mp4", "Солнечно", "Sunny"),
        "Clear" => asset("images/moon.png", "videos/clear.mp4", "Ясно", "Clear"),
        "Partly cloudy" => asset(
            "images/partlycloudy.png",
            "videos/partlycloudy.mp4",
            "Переменная облачность",
            "Partly cloudy",
        ),
        "Cloudy" => asset("images/cloud.png", "videos/cloudy.mp4", "Облачно", "Cloudy"),
        "Overcast" => asset("images/cloud.png", "videos/cloudy.mp4", "Пасмурно", "Overcast"),
        "Mist" => asset("images/mist.png", "videos/mist.mp4", "Дымка", "Mist"),
        "Fog" => asset("images/mist.png", "videos/mist.mp4", "Туман", "Fog"),
        "Patchy rain possible" => asset(
            "images/moderaterain.png",
            "videos/rain.mp4",
            "Местами дождь",
            "Patchy rain possible",
        ),
        "Light rain" => {
            asset("images/moderaterain.png", "videos/rain.mp4", "Небольшой дождь", "Light rain")
        }
        "Moderate rain" => {
            asset("images/moderaterain.png", "videos/rain.mp4", "Умеренный дождь", "Moderate rain")
        }
        "Heavy rain" => {
            asset("images/heavyrain.png", "videos/heavyrain.mp4", "Сильный дождь", "Heavy rain")
        }
        "Light snow" => asset("images/snow.png", "videos/snow.mp4", "Небольшой снег", "Light snow"),
        "Heavy snow" => asset("images/snow.png", "videos/snow.mp4", "Сильный снег", "Heavy snow"),
        "Thundery outbreaks possible" => asset(
            "images/heavyrain.png",
            "videos/thunder.mp4",
            "Возможна гроза",
            "Thundery outbreaks possible",
        ),
        _ => return None,
    };

    Some(found)
}

/// Maps an English weekday name (`"Sunday"`) to its labels in `locale`.
pub fn day_labels(weekday_name: &str, locale: DisplayLocale) -> Option<DayLabels> {
    let (short, full) = match (locale, weekday_name) {
        (DisplayLocale::Ru, "Monday") => ("Пн", "Понедельник"),
        (DisplayLocale::Ru, "Tuesday") => ("Вт", "Вторник"),
        (DisplayLocale::Ru, "Wednesday") => ("Ср", "Среда"),
        (DisplayLocale::Ru, "Thursday") => ("Чт", "Четверг"),
        (DisplayLocale::Ru, "Friday") => ("Пт", "Пятница"),
        (DisplayLocale::Ru, "Saturday") => ("Сб", "Суббота"),
        (DisplayLocale::Ru, "Sunday") => ("Вс", "Воскресенье"),
        (DisplayLocale::En, "Monday") => ("Mon", "Monday"),
        (DisplayLocale::En, "Tuesday") => ("Tue", "Tuesday"),
        (DisplayLocale::En, "Wednesday") => ("Wed", "Wednesday"),
        (DisplayLocale::En, "Thursday") => ("Thu", "Thursday"),
        (DisplayLocale::En, "Friday") => ("Fri", "Friday"),
        (DisplayLocale::En, "Saturday") => ("Sat", "Saturday"),
        (DisplayLocale::En, "Sunday") => ("Sun", "Sunday"),
        _ => return None,
    };

    Some(DayLabels { short, full })
}
