//! HTTP client for the forecast and geocoding providers.
//!
//! Wraps `reqwest` with provider-specific error handling and typed response
//! deserialization. The client is a stateless transformer: it reads inputs
//! and returns fresh snapshots, never retaining prior results.

use std::time::Duration;

use reqwest::{Client, Url};

use wearcast_core::{CityMatch, Coordinates, UnitSystem, WeatherSnapshot};

use crate::codes;
use crate::error::WeatherError;
use crate::types::{ForecastResponse, GeocodingResponse};

const DEFAULT_FORECAST_BASE: &str = "https://api.open-meteo.com";
const DEFAULT_GEOCODING_BASE: &str = "https://geocoding-api.open-meteo.com";
const USER_AGENT: &str = "wearcast/0.1 (outfit-suggestions)";

/// Variables requested from the forecast provider's current block.
const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,\
weather_code,wind_speed_10m,wind_direction_10m";

/// Client for the forecast and geocoding providers.
///
/// Use [`WeatherClient::new`] for production or
/// [`WeatherClient::with_base_urls`] to point at a mock server in tests.
pub struct WeatherClient {
    client: Client,
    forecast_base: Url,
    geocoding_base: Url,
}

impl WeatherClient {
    /// Creates a new client pointed at the production providers.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, WeatherError> {
        Self::with_base_urls(DEFAULT_FORECAST_BASE, DEFAULT_GEOCODING_BASE, timeout_secs)
    }

    /// Creates a new client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WeatherError::InvalidBaseUrl`] if a base
    /// URL does not parse.
    pub fn with_base_urls(
        forecast_base: &str,
        geocoding_base: &str,
        timeout_secs: u64,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            forecast_base: parse_base_url(forecast_base)?,
            geocoding_base: parse_base_url(geocoding_base)?,
        })
    }

    /// Fetches current conditions for the given coordinates and unit system.
    ///
    /// `location_label` is carried into the snapshot unchanged; the caller
    /// decides how the place is displayed.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::Upstream`] on a non-success HTTP status.
    /// - [`WeatherError::DataUnavailable`] if the response lacks a current
    ///   block.
    /// - [`WeatherError::Http`] / [`WeatherError::Deserialize`] on transport
    ///   or decoding failure.
    pub async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        units: UnitSystem,
        location_label: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.forecast_url(coordinates, units);

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "forecast request rejected");
            return Err(WeatherError::Upstream(response.status().as_u16()));
        }

        let body = response.text().await?;
        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let current = parsed.current.ok_or(WeatherError::DataUnavailable)?;
        let unit_labels = parsed.current_units.unwrap_or_default();

        Ok(WeatherSnapshot {
            summary: codes::summary_for(current.weather_code).to_owned(),
            summary_code: current.weather_code,
            temperature: current.temperature_2m,
            feels_like: current.apparent_temperature,
            humidity: current.relative_humidity_2m,
            wind_speed: current.wind_speed_10m,
            wind_direction_deg: current.wind_direction_10m,
            temperature_unit: unit_labels
                .temperature_2m
                .unwrap_or_else(|| units.temperature_label().to_owned()),
            wind_unit: unit_labels
                .wind_speed_10m
                .unwrap_or_else(|| units.wind_label().to_owned()),
            observed_at: current.time,
            timezone: parsed.timezone.unwrap_or_default(),
            location: location_label.to_owned(),
        })
    }

    /// Resolves a city name to its top geocoding match.
    ///
    /// # Errors
    ///
    /// - [`WeatherError::NotFound`] if the provider returns zero results.
    /// - [`WeatherError::Upstream`] on a non-success HTTP status.
    /// - [`WeatherError::Http`] / [`WeatherError::Deserialize`] on transport
    ///   or decoding failure.
    pub async fn geocode_city(&self, name: &str) -> Result<CityMatch, WeatherError> {
        let url = self.geocoding_url(name);

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "geocoding request rejected");
            return Err(WeatherError::Upstream(response.status().as_u16()));
        }

        let body = response.text().await?;
        let parsed: GeocodingResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let hit = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(WeatherError::NotFound)?;

        Ok(CityMatch {
            name: hit.name,
            admin1: hit.admin1,
            country: hit.country,
            latitude: hit.latitude,
            longitude: hit.longitude,
        })
    }

    fn forecast_url(&self, coordinates: Coordinates, units: UnitSystem) -> Url {
        let mut url = self.forecast_base.clone();
        url.set_path("/v1/forecast");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("latitude", &coordinates.latitude.to_string());
            pairs.append_pair("longitude", &coordinates.longitude.to_string());
            pairs.append_pair("current", CURRENT_FIELDS);
            pairs.append_pair("timezone", "auto");
            pairs.append_pair("temperature_unit", units.temperature_token());
            pairs.append_pair("wind_speed_unit", units.wind_token());
        }
        url
    }

    fn geocoding_url(&self, name: &str) -> Url {
        let mut url = self.geocoding_base.clone();
        url.set_path("/v1/search");
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("name", name);
            pairs.append_pair("count", "1");
            pairs.append_pair("language", "en");
            pairs.append_pair("format", "json");
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, WeatherError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| WeatherError::InvalidBaseUrl(format!("'{raw}': {e}")))
}
