//! Presentation theme derived from a successful report.
//!
//! The category derivation is a small decision table over the free-text
//! condition description. Keeping it as an ordered list of rules makes
//! the priority auditable: descriptions often contain several keywords
//! ("partly cloudy with rain") and the first matching rule wins.

use crate::model::WeatherReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayNight {
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Clear,
    Cloudy,
    Rainy,
    Snowy,
    Sunny,
    Default,
}

impl WeatherCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Clear => "clear",
            WeatherCategory::Cloudy => "cloudy",
            WeatherCategory::Rainy => "rainy",
            WeatherCategory::Snowy => "snowy",
            WeatherCategory::Sunny => "sunny",
            WeatherCategory::Default => "default",
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day/night flag plus coarse weather category, recomputed on every
/// successful fetch. Absent whenever the report is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedTheme {
    pub day_or_night: DayNight,
    pub category: WeatherCategory,
}

/// Ordered substring rules, evaluated top to bottom. Order matters:
/// "cloud" must be tested before "rain" so that mixed descriptions
/// classify as cloudy.
const CATEGORY_RULES: &[(&str, WeatherCategory)] = &[
    ("clear", WeatherCategory::Clear),
    ("cloud", WeatherCategory::Cloudy),
    ("rain", WeatherCategory::Rainy),
    ("snow", WeatherCategory::Snowy),
    ("sunny", WeatherCategory::Sunny),
];

/// Classify a condition description into a coarse category.
///
/// Total: any string maps to exactly one category, falling back to
/// [`WeatherCategory::Default`] when no rule matches.
pub fn classify_condition(condition_text: &str) -> WeatherCategory {
    let lower = condition_text.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, category)| *category)
        .unwrap_or(WeatherCategory::Default)
}

/// Derive the presentation theme from a successful report.
pub fn classify(report: &WeatherReport) -> DerivedTheme {
    DerivedTheme {
        day_or_night: if report.is_day { DayNight::Day } else { DayNight::Night },
        category: classify_condition(&report.condition_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(condition: &str, is_day: bool) -> WeatherReport {
        WeatherReport {
            location_name: "Colombo".to_string(),
            country: "Sri Lanka".to_string(),
            temp_c: 29.0,
            humidity_pct: 70,
            wind_kph: 13.0,
            uv_index: 6.0,
            is_day,
            condition_text: condition.to_string(),
            condition_icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".to_string(),
        }
    }

    #[test]
    fn category_priority_clear_beats_everything() {
        assert_eq!(classify_condition("Clear with rain"), WeatherCategory::Clear);
    }

    #[test]
    fn cloud_beats_rain_in_mixed_descriptions() {
        assert_eq!(
            classify_condition("partly cloudy with rain"),
            WeatherCategory::Cloudy
        );
        assert_eq!(
            classify_condition("light rain and clouds"),
            WeatherCategory::Cloudy
        );
    }

    #[test]
    fn snow_and_sunny_match() {
        assert_eq!(classify_condition("Heavy snow"), WeatherCategory::Snowy);
        assert_eq!(classify_condition("Mostly sunny"), WeatherCategory::Sunny);
    }

    #[test]
    fn unmatched_description_falls_back_to_default() {
        assert_eq!(classify_condition("Overcast"), WeatherCategory::Default);
        assert_eq!(classify_condition(""), WeatherCategory::Default);
        assert_eq!(classify_condition("Mist"), WeatherCategory::Default);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify_condition("CLEAR"), WeatherCategory::Clear);
        assert_eq!(classify_condition("Patchy RAIN possible"), WeatherCategory::Rainy);
    }

    #[test]
    fn colombo_partly_cloudy_daytime() {
        let theme = classify(&report_with("Partly cloudy", true));
        assert_eq!(theme.day_or_night, DayNight::Day);
        assert_eq!(theme.category, WeatherCategory::Cloudy);
    }

    #[test]
    fn night_flag_propagates() {
        let theme = classify(&report_with("Clear", false));
        assert_eq!(theme.day_or_night, DayNight::Night);
        assert_eq!(theme.category, WeatherCategory::Clear);
    }
}
