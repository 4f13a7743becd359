//! The input → fetch → classify → render state machine.
//!
//! All mutation happens on discrete events: a text change, a suggestion
//! click, a submit, or the completion of the single asynchronous fetch.
//! Fetches are tagged with a sequence number; a completion is applied
//! only if its ticket is still the latest issued, so a superseded
//! request can never overwrite a newer result.

use tracing::debug;

use crate::{
    model::{ForecastDay, RequestStatus, WeatherReport},
    provider::{FetchError, WeatherProvider},
    theme::{self, DerivedTheme},
};

/// Quick-pick cities shown until the user makes a first selection.
pub const SUGGESTED_CITIES: &[&str] = &[
    "Colombo",
    "NuwaraEliya",
    "Gampaha",
    "Negombo",
    "Kandy",
    "Matara",
    "Jaffna",
    "Batticaloa",
    "Trincomalee",
    "Anuradhapura",
];

/// Handle for one issued fetch. Completing a ticket that has been
/// superseded by a newer one is a no-op.
#[derive(Debug)]
pub struct FetchTicket {
    seq: u64,
    city: String,
}

impl FetchTicket {
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Payload of a successful fetch: the report plus any forecast days.
#[derive(Debug)]
pub struct FetchOutcome {
    pub report: WeatherReport,
    pub forecast: Vec<ForecastDay>,
}

pub struct WeatherApp {
    provider: Box<dyn WeatherProvider>,
    /// Forecast days to request; 0 means current conditions only.
    forecast_days: u8,
    city_text: String,
    show_suggestions: bool,
    status: RequestStatus,
    report: Option<WeatherReport>,
    theme: Option<DerivedTheme>,
    forecast: Vec<ForecastDay>,
    error: Option<String>,
    fetch_seq: u64,
}

impl WeatherApp {
    pub fn new(provider: Box<dyn WeatherProvider>, forecast_days: u8) -> Self {
        Self {
            provider,
            forecast_days,
            city_text: String::new(),
            show_suggestions: true,
            status: RequestStatus::Idle,
            report: None,
            theme: None,
            forecast: Vec::new(),
            error: None,
            fetch_seq: 0,
        }
    }

    pub fn city_text(&self) -> &str {
        &self.city_text
    }

    /// Input capture; the text is never cleared automatically.
    pub fn set_city_text(&mut self, text: impl Into<String>) {
        self.city_text = text.into();
    }

    pub fn suggestions(&self) -> &'static [&'static str] {
        SUGGESTED_CITIES
    }

    pub fn suggestions_visible(&self) -> bool {
        self.show_suggestions
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn theme(&self) -> Option<DerivedTheme> {
        self.theme
    }

    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a fetch for `explicit` if given, else the current input
    /// text. An empty resolved city is a strict no-op: no ticket, no
    /// state change.
    pub fn begin_fetch(&mut self, explicit: Option<&str>) -> Option<FetchTicket> {
        let city = explicit.unwrap_or(&self.city_text).trim();
        if city.is_empty() {
            return None;
        }

        self.fetch_seq += 1;
        self.status = RequestStatus::Loading;
        debug!(seq = self.fetch_seq, city, "fetch issued");

        Some(FetchTicket { seq: self.fetch_seq, city: city.to_string() })
    }

    /// Apply a completed fetch. Stale tickets (superseded by a newer
    /// `begin_fetch`) are discarded: last issued wins.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<FetchOutcome, FetchError>,
    ) {
        if ticket.seq != self.fetch_seq {
            debug!(seq = ticket.seq, latest = self.fetch_seq, "discarding stale completion");
            return;
        }

        match outcome {
            Ok(FetchOutcome { report, forecast }) => {
                self.theme = Some(theme::classify(&report));
                self.report = Some(report);
                self.forecast = forecast;
                self.error = None;
                self.status = RequestStatus::Success;
            }
            Err(err) => {
                self.report = None;
                self.theme = None;
                self.forecast.clear();
                self.error = Some(err.user_message());
                self.status = RequestStatus::Error;
            }
        }
    }

    /// Resolve the city, run the single provider call, and apply the
    /// result. Empty city is a no-op.
    pub async fn fetch_weather(&mut self, explicit: Option<&str>) {
        let Some(ticket) = self.begin_fetch(explicit) else {
            return;
        };

        let outcome = self.request(ticket.city()).await;
        self.complete_fetch(ticket, outcome);
    }

    /// Submit the current input text (Enter-key equivalent).
    pub async fn submit(&mut self) {
        self.fetch_weather(None).await;
    }

    /// Pick a suggestion: set the input text to the label, hide the
    /// panel for good, and fetch with that label regardless of any
    /// previously typed free text.
    pub async fn select_suggestion(&mut self, label: &str) {
        self.city_text = label.to_string();
        self.show_suggestions = false;
        self.fetch_weather(Some(label)).await;
    }

    async fn request(&self, city: &str) -> Result<FetchOutcome, FetchError> {
        if self.forecast_days == 0 {
            let report = self.provider.current(city).await?;
            Ok(FetchOutcome { report, forecast: Vec::new() })
        } else {
            let (report, forecast) = self.provider.forecast(city, self.forecast_days).await?;
            Ok(FetchOutcome { report, forecast })
        }
    }
}
