use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    Config,
    model::{ForecastDay, WeatherReport},
    provider::weatherapi::WeatherApiProvider,
};

pub mod weatherapi;

/// How a fetch can fail. Only two kinds exist and both are terminal
/// for the request: no retry is attempted.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider was reachable and answered with a structured error
    /// payload. Its message is surfaced to the user verbatim.
    #[error("{0}")]
    Provider(String),

    /// Network failure, timeout, or an undecodable body. The user sees
    /// one fixed message; the underlying cause is kept for logs only.
    #[error("Failed to fetch weather")]
    Transport(#[source] anyhow::Error),
}

impl FetchError {
    /// Message shown to the user: verbatim for provider errors, the
    /// fixed generic string for transport failures.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Abstraction over the external weather service, the seam that lets
/// the app state machine run against a fake in tests.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for a city.
    async fn current(&self, city: &str) -> Result<WeatherReport, FetchError>;

    /// Fetch current conditions plus up to `days` forecast days.
    async fn forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<(WeatherReport, Vec<ForecastDay>), FetchError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather-reporter configure` and enter your WeatherAPI.com key."
        )
    })?;

    WeatherApiProvider::with_base_url(api_key.to_owned(), config.base_url.clone())
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `weather-reporter configure`"));
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_error_message_is_verbatim() {
        let err = FetchError::Provider("No matching location found.".to_string());
        assert_eq!(err.user_message(), "No matching location found.");
    }

    #[test]
    fn transport_error_message_is_fixed() {
        let err = FetchError::Transport(anyhow::anyhow!("connection reset by peer"));
        assert_eq!(err.user_message(), "Failed to fetch weather");
    }

    #[test]
    fn transport_error_keeps_cause_in_the_chain() {
        let err = FetchError::Transport(anyhow::anyhow!("connection reset by peer"));

        let source = std::error::Error::source(&err).expect("cause present");
        assert_eq!(source.to_string(), "connection reset by peer");
    }
}
