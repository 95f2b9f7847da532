//! Prompt construction for the generation provider.

use wearcast_core::WeatherSnapshot;
use wearcast_weather::units;

/// Persona and output contract sent with every suggestion request.
pub const SYSTEM_INSTRUCTION: &str = "You are a concise personal stylist. Given current weather \
conditions, suggest what to wear outdoors today. Respond with exactly four bulleted sections: \
**Base Layer**, **Mid Layer**, **Outer Layer**, and **Accessories** — one short sentence each. \
Do not give medical advice.";

/// Render a snapshot as the fixed multi-line prompt.
///
/// Line order is part of the contract: summary, temperature, feels-like,
/// humidity, wind, location, local time.
#[must_use]
pub fn build_prompt(weather: &WeatherSnapshot) -> String {
    format!(
        "Conditions: {}\nTemperature: {}\nFeels like: {}\nHumidity: {}\nWind: {}\nLocation: {}\nLocal time: {} ({})",
        weather.summary,
        units::format_temperature(weather.temperature, &weather.temperature_unit),
        units::format_temperature(weather.feels_like, &weather.temperature_unit),
        units::format_humidity(weather.humidity),
        units::format_wind(weather.wind_speed, &weather.wind_unit, weather.wind_direction_deg),
        weather.location,
        weather.observed_at,
        weather.timezone,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            summary: "Light rain".to_string(),
            summary_code: 61,
            temperature: 54.3,
            feels_like: 51.0,
            humidity: 81.0,
            wind_speed: 12.4,
            wind_direction_deg: 290.0,
            temperature_unit: "°F".to_string(),
            wind_unit: "mph".to_string(),
            observed_at: "2025-03-01T14:00".to_string(),
            timezone: "America/Los_Angeles".to_string(),
            location: "San Francisco, California".to_string(),
        }
    }

    #[test]
    fn prompt_lines_follow_the_fixed_order() {
        let prompt = build_prompt(&snapshot());
        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Conditions: Light rain");
        assert_eq!(lines[1], "Temperature: 54°F");
        assert_eq!(lines[2], "Feels like: 51°F");
        assert_eq!(lines[3], "Humidity: 81%");
        assert_eq!(lines[4], "Wind: 12 mph WNW");
        assert_eq!(lines[5], "Location: San Francisco, California");
        assert_eq!(lines[6], "Local time: 2025-03-01T14:00 (America/Los_Angeles)");
    }

    #[test]
    fn instruction_names_all_four_sections() {
        for section in ["Base Layer", "Mid Layer", "Outer Layer", "Accessories"] {
            assert!(
                SYSTEM_INSTRUCTION.contains(section),
                "missing section {section}"
            );
        }
        assert!(SYSTEM_INSTRUCTION.contains("no medical advice")
            || SYSTEM_INSTRUCTION.contains("Do not give medical advice"));
    }
}
