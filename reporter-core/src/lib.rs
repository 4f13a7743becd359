//! Core library for the `weather-reporter` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client behind a provider trait
//! - The input → fetch → classify → render state machine
//! - Shared domain models (reports, forecasts, derived theme)
//!
//! It is used by `reporter-cli`, but can also be reused by other binaries or services.

pub mod app;
pub mod config;
pub mod model;
pub mod provider;
pub mod theme;
pub mod view;

pub use app::{FetchOutcome, FetchTicket, SUGGESTED_CITIES, WeatherApp};
pub use config::Config;
pub use model::{ForecastDay, RequestStatus, WeatherReport};
pub use provider::{FetchError, WeatherProvider, weatherapi::WeatherApiProvider};
pub use theme::{DayNight, DerivedTheme, WeatherCategory, classify, classify_condition};
pub use view::{View, render};
