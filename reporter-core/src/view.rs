//! Pure derivation of what should be on screen.
//!
//! Rendering is a function of the app state and nothing else: the
//! suggestion panel shows until the first pick, the error line only on
//! a failed request, the conditions block only when a report exists,
//! and the loading indicator only while a request is in flight.

use crate::{
    app::WeatherApp,
    model::{ForecastDay, RequestStatus, WeatherReport},
    theme::DerivedTheme,
};

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub suggestions: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub current: Option<WeatherReport>,
    pub theme: Option<DerivedTheme>,
    pub forecast: Vec<ForecastDay>,
}

pub fn render(app: &WeatherApp) -> View {
    let suggestions = if app.suggestions_visible() {
        app.suggestions().iter().map(|s| (*s).to_string()).collect()
    } else {
        Vec::new()
    };

    let error = if app.status() == RequestStatus::Error {
        app.error_message().map(str::to_string)
    } else {
        None
    };

    View {
        suggestions,
        loading: app.status() == RequestStatus::Loading,
        error,
        current: app.report().cloned(),
        theme: app.theme(),
        forecast: app.forecast().to_vec(),
    }
}
