use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use reporter_core::{Config, WeatherApp, provider::provider_from_config, view};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-reporter", version, about = "Weather reporter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store your WeatherAPI.com key.
    Configure,

    /// Show weather for a city and exit.
    Show {
        /// City name, e.g. "Colombo".
        city: String,

        /// Forecast days to include (max 5); omit for current conditions only.
        #[arg(long)]
        days: Option<u8>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city, days }) => show(&city, days).await,
            None => session::run().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str, days: Option<u8>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut app = WeatherApp::new(Box::new(provider), days.unwrap_or(0));
    app.fetch_weather(Some(city)).await;

    render::print_view(&view::render(&app));
    Ok(())
}
