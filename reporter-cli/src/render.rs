//! Terminal formatting of the derived view.

use reporter_core::{DayNight, View};

pub fn print_view(view: &View) {
    if view.loading {
        println!("Fetching weather...");
    }

    if let Some(message) = &view.error {
        eprintln!("Error: {message}");
    }

    if let Some(report) = &view.current {
        let marker = match view.theme.map(|t| t.day_or_night) {
            Some(DayNight::Night) => "🌙",
            _ => "☀️",
        };

        println!("{marker} {}, {}", report.location_name, report.country);
        println!("  {} ({})", report.condition_text, category_label(view));
        println!("  Temperature: {:.1}°C", report.temp_c);
        println!("  Humidity:    {}%", report.humidity_pct);
        println!("  Wind:        {:.1} kph", report.wind_kph);
        println!("  UV index:    {:.1}", report.uv_index);
    }

    if !view.forecast.is_empty() {
        println!();
        println!("Forecast:");
        for day in &view.forecast {
            println!(
                "  {}  {:>5.1}°C / {:>5.1}°C  {}",
                day.date, day.min_temp_c, day.max_temp_c, day.condition_text
            );
        }
    }
}

fn category_label(view: &View) -> &'static str {
    view.theme.map_or("default", |t| t.category.as_str())
}
