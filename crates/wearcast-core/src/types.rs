use serde::{Deserialize, Serialize};

/// A resolved geographic position. Replaced wholesale on each fetch, never
/// mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Whether both components fall inside the valid geographic ranges.
    #[must_use]
    pub fn in_range(self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Measurement system for a single forecast request.
///
/// A property of the request, not of stored state: changing the unit system
/// re-fetches the forecast rather than converting cached values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    /// Temperature unit token in the forecast provider's query vocabulary.
    #[must_use]
    pub fn temperature_token(self) -> &'static str {
        match self {
            Self::Imperial => "fahrenheit",
            Self::Metric => "celsius",
        }
    }

    /// Wind-speed unit token in the forecast provider's query vocabulary.
    #[must_use]
    pub fn wind_token(self) -> &'static str {
        match self {
            Self::Imperial => "mph",
            Self::Metric => "kmh",
        }
    }

    /// Display label for temperatures when the provider omits one.
    #[must_use]
    pub fn temperature_label(self) -> &'static str {
        match self {
            Self::Imperial => "°F",
            Self::Metric => "°C",
        }
    }

    /// Display label for wind speeds when the provider omits one.
    #[must_use]
    pub fn wind_label(self) -> &'static str {
        match self {
            Self::Imperial => "mph",
            Self::Metric => "km/h",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Imperial => Self::Metric,
            Self::Metric => Self::Imperial,
        }
    }
}

/// One fully-resolved weather observation for one place, time, and unit
/// system. Superseded, not merged, by the next successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub summary: String,
    pub summary_code: i32,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction_deg: f64,
    pub temperature_unit: String,
    pub wind_unit: String,
    pub observed_at: String,
    pub timezone: String,
    pub location: String,
}

/// Top geocoding hit for a city search. Alternate matches are discarded by
/// the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMatch {
    pub name: String,
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityMatch {
    /// Display label joining name, region, and country with ", ", skipping
    /// any empty part.
    #[must_use]
    pub fn display_label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        for field in [&self.admin1, &self.country] {
            if let Some(value) = field {
                if !value.is_empty() {
                    parts.push(value.as_str());
                }
            }
        }
        parts.join(", ")
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
