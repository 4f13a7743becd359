//! Interactive session: the CLI rendition of the widget's input box
//! and suggestion panel.
//!
//! The quick-pick list of suggested cities is offered until the user
//! makes a first selection, after which only the free-text prompt
//! remains. Esc ends the session.

use anyhow::Context;
use inquire::{InquireError, Select, Text};
use reporter_core::{Config, WeatherApp, provider::provider_from_config, view};

use crate::render;

const FREE_TEXT_CHOICE: &str = "Type a city name...";

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    if !config.is_configured() {
        anyhow::bail!(
            "No API key configured.\n\
             Hint: run `weather-reporter configure` and enter your WeatherAPI.com key."
        );
    }

    let provider = provider_from_config(&config)?;
    let mut app = WeatherApp::new(Box::new(provider), config.forecast_days);

    println!("Weather Reporter (Esc to quit)");

    loop {
        if app.suggestions_visible() {
            let mut options: Vec<&str> = app.suggestions().to_vec();
            options.push(FREE_TEXT_CHOICE);

            match Select::new("Pick a city:", options).prompt() {
                Ok(FREE_TEXT_CHOICE) => {
                    let Some(city) = prompt_city(&app)? else { break };
                    app.set_city_text(city);
                    app.submit().await;
                }
                Ok(city) => app.select_suggestion(city).await,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(e) => return Err(e).context("Failed to read selection"),
            }
        } else {
            let Some(city) = prompt_city(&app)? else { break };
            app.set_city_text(city);
            app.submit().await;
        }

        render::print_view(&view::render(&app));
        println!();
    }

    Ok(())
}

/// Prompt for a city name. Returns `None` when the user cancels.
fn prompt_city(app: &WeatherApp) -> anyhow::Result<Option<String>> {
    match Text::new("City name:").with_initial_value(app.city_text()).prompt() {
        Ok(city) => Ok(Some(city)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read city name"),
    }
}
