use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current conditions for one location, as consumed by rendering.
///
/// Replaced wholesale on every successful fetch and cleared on error,
/// so stale data is never shown next to an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location_name: String,
    pub country: String,
    pub temp_c: f64,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub uv_index: f64,
    pub is_day: bool,
    pub condition_text: String,
    pub condition_icon: String,
}

/// One day of the short-range forecast, at most five per report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition_text: String,
    pub condition_icon: String,
}

/// Lifecycle of the single in-flight request. Exactly one variant is
/// active at a time; `Loading` is cleared in the success and error
/// branches alike once a completion is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}
