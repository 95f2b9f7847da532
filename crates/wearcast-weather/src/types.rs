//! Wire types for the forecast and geocoding providers.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub current: Option<CurrentConditions>,
    pub current_units: Option<CurrentUnits>,
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentConditions {
    pub time: String,
    pub temperature_2m: f64,
    pub apparent_temperature: f64,
    pub relative_humidity_2m: f64,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
    pub wind_direction_10m: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CurrentUnits {
    pub temperature_2m: Option<String>,
    pub wind_speed_10m: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    pub results: Option<Vec<GeocodingHit>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingHit {
    pub name: String,
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}
