use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{ForecastDay, WeatherReport};

use super::{FetchError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Forecast length the report supports; longer requests are clamped.
pub const MAX_FORECAST_DAYS: u8 = 5;

/// HTTP client for WeatherAPI.com.
///
/// The base URL is injectable so tests can point the client at a mock
/// server instead of the live service.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Result<Self, FetchError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FetchError::Transport(e.into()))?;

        Ok(Self { api_key, base_url, http })
    }

    /// Issue one GET and return the raw body.
    ///
    /// WeatherAPI signals failures like "no matching location" through a
    /// JSON error payload, sometimes with a non-2xx status and sometimes
    /// without, so the body is decoded before the status is judged.
    async fn get_body(&self, url: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        debug!(url, "requesting weather data");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Transport(anyhow!(e).context("request failed")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Transport(anyhow!(e).context("failed to read response body")))?;

        if let Ok(envelope) = serde_json::from_str::<WaErrorEnvelope>(&body) {
            warn!(message = %envelope.error.message, "provider returned an error payload");
            return Err(FetchError::Provider(envelope.error.message));
        }

        if !status.is_success() {
            return Err(FetchError::Transport(anyhow!(
                "request failed with status {status}: {}",
                truncate_body(&body)
            )));
        }

        Ok(body)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let url = self.endpoint("current.json");
        let body = self
            .get_body(&url, &[("key", self.api_key.as_str()), ("q", city), ("aqi", "no")])
            .await?;

        let parsed: WaCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Transport(anyhow!(e).context("failed to parse current JSON")))?;

        Ok(parsed.into_report())
    }

    async fn forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<(WeatherReport, Vec<ForecastDay>), FetchError> {
        let days = days.clamp(1, MAX_FORECAST_DAYS).to_string();

        let url = self.endpoint("forecast.json");
        let body = self
            .get_body(
                &url,
                &[
                    ("key", self.api_key.as_str()),
                    ("q", city),
                    ("days", days.as_str()),
                    ("aqi", "no"),
                ],
            )
            .await?;

        let parsed: WaForecastResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Transport(anyhow!(e).context("failed to parse forecast JSON")))?;

        let report = WaCurrentResponse {
            location: parsed.location,
            current: parsed.current,
        }
        .into_report();

        let forecast = parsed
            .forecast
            .forecastday
            .into_iter()
            .take(usize::from(MAX_FORECAST_DAYS))
            .map(WaForecastDay::into_day)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((report, forecast))
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorEnvelope {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    uv: f64,
    is_day: u8,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl WaCurrentResponse {
    fn into_report(self) -> WeatherReport {
        WeatherReport {
            location_name: self.location.name,
            country: self.location.country,
            temp_c: self.current.temp_c,
            humidity_pct: self.current.humidity,
            wind_kph: self.current.wind_kph,
            uv_index: self.current.uv,
            is_day: self.current.is_day != 0,
            condition_text: self.current.condition.text,
            condition_icon: self.current.condition.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
}

impl WaForecastDay {
    fn into_day(self) -> Result<ForecastDay, FetchError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| FetchError::Transport(anyhow!(e).context("invalid forecast date")))?;

        Ok(ForecastDay {
            date,
            max_temp_c: self.day.maxtemp_c,
            min_temp_c: self.day.mintemp_c,
            condition_text: self.day.condition.text,
            condition_icon: self.day.condition.icon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Floor to a char boundary so multi-byte bodies cannot panic the slice.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_response_maps_to_report() {
        let body = r#"{
            "location": { "name": "Colombo", "country": "Sri Lanka" },
            "current": {
                "temp_c": 29.0,
                "humidity": 70,
                "wind_kph": 13.0,
                "uv": 6.0,
                "is_day": 1,
                "condition": {
                    "text": "Partly cloudy",
                    "icon": "//cdn.weatherapi.com/weather/64x64/day/116.png"
                }
            }
        }"#;

        let parsed: WaCurrentResponse = serde_json::from_str(body).expect("valid body");
        let report = parsed.into_report();

        assert_eq!(report.location_name, "Colombo");
        assert_eq!(report.country, "Sri Lanka");
        assert!(report.is_day);
        assert_eq!(report.condition_text, "Partly cloudy");
        assert_eq!(report.humidity_pct, 70);
    }

    #[test]
    fn is_day_zero_means_night() {
        let current = WaCurrent {
            temp_c: 18.0,
            humidity: 80,
            wind_kph: 5.0,
            uv: 0.0,
            is_day: 0,
            condition: WaCondition { text: "Clear".into(), icon: "".into() },
        };
        let report = WaCurrentResponse {
            location: WaLocation { name: "Kandy".into(), country: "Sri Lanka".into() },
            current,
        }
        .into_report();

        assert!(!report.is_day);
    }

    #[test]
    fn forecast_day_parses_date() {
        let day = WaForecastDay {
            date: "2025-07-14".to_string(),
            day: WaDay {
                maxtemp_c: 31.0,
                mintemp_c: 24.0,
                condition: WaCondition { text: "Light rain".into(), icon: "".into() },
            },
        };

        let parsed = day.into_day().expect("valid date");
        assert_eq!(parsed.date.to_string(), "2025-07-14");
        assert_eq!(parsed.max_temp_c, 31.0);
    }

    #[test]
    fn forecast_day_rejects_bad_date() {
        let day = WaForecastDay {
            date: "14/07/2025".to_string(),
            day: WaDay {
                maxtemp_c: 31.0,
                mintemp_c: 24.0,
                condition: WaCondition { text: "Light rain".into(), icon: "".into() },
            },
        };

        assert!(matches!(day.into_day(), Err(FetchError::Transport(_))));
    }

    #[test]
    fn truncate_body_keeps_short_bodies_intact() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_floors_to_char_boundary() {
        // 100 three-byte chars: byte 200 lands mid-character.
        let body = "日".repeat(100);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.trim_end_matches("..."), "日".repeat(66));
    }

    #[test]
    fn error_envelope_decodes() {
        let body = r#"{ "error": { "code": 1006, "message": "No matching location found." } }"#;
        let envelope: WaErrorEnvelope = serde_json::from_str(body).expect("error payload");
        assert_eq!(envelope.error.message, "No matching location found.");
    }
}
