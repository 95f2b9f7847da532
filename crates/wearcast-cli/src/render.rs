//! Terminal rendering of the three pipeline flows.
//!
//! Each flow renders independently: an error in one section never hides
//! another section's content.

use wearcast_pipeline::{PipelineState, Status};
use wearcast_weather::units;

pub fn render(state: &PipelineState) {
    if state.city.status == Status::Error {
        if let Some(message) = &state.city.error {
            println!("! {message}");
        }
    }

    match state.weather.status {
        Status::Ready => {
            if let Some(snapshot) = &state.weather.value {
                println!("{}", snapshot.location);
                println!(
                    "{}  {} (feels like {})",
                    snapshot.summary,
                    units::format_temperature(snapshot.temperature, &snapshot.temperature_unit),
                    units::format_temperature(snapshot.feels_like, &snapshot.temperature_unit),
                );
                println!(
                    "humidity {}  wind {}",
                    units::format_humidity(snapshot.humidity),
                    units::format_wind(
                        snapshot.wind_speed,
                        &snapshot.wind_unit,
                        snapshot.wind_direction_deg
                    ),
                );
                println!("observed {} ({})", snapshot.observed_at, snapshot.timezone);
            }
        }
        Status::Error => {
            if let Some(message) = &state.weather.error {
                println!("! {message}");
            }
        }
        Status::Idle | Status::Locating | Status::Loading => {
            println!("no weather yet — try --city NAME or --lat/--lon");
        }
    }

    println!();

    match state.advice.status {
        Status::Ready => {
            let rows = state.advice.value.as_deref().unwrap_or_default();
            if rows.is_empty() {
                println!("no suggestion yet — fetch weather first");
            } else {
                for row in rows {
                    match &row.label {
                        Some(label) => println!("{label}: {}", row.text),
                        None => println!("{}", row.text),
                    }
                }
            }
        }
        Status::Error => {
            if let Some(message) = &state.advice.error {
                println!("! {message}");
            }
        }
        Status::Idle | Status::Locating | Status::Loading => {}
    }
}
