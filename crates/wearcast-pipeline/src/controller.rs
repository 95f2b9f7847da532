//! Async driver wiring the state machine to real clients.

use async_trait::async_trait;

use wearcast_advice::{parser, AdviceClient, AdviceError};
use wearcast_core::{CityMatch, Coordinates, UnitSystem, WeatherSnapshot};
use wearcast_weather::{WeatherClient, WeatherError};

use crate::location::{DeviceFix, LocationError, LOCATION_WAIT, MAX_FIX_AGE};
use crate::state::{parse_coordinates, PipelineState, INVALID_COORDINATES_MESSAGE};

/// Forecast and geocoding operations the pipeline depends on.
#[async_trait]
pub trait ForecastApi: Send + Sync {
    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        units: UnitSystem,
        location_label: &str,
    ) -> Result<WeatherSnapshot, WeatherError>;

    async fn geocode_city(&self, name: &str) -> Result<CityMatch, WeatherError>;
}

/// Suggestion operation the pipeline depends on.
#[async_trait]
pub trait SuggestionApi: Send + Sync {
    async fn request_suggestion(&self, snapshot: &WeatherSnapshot)
        -> Result<String, AdviceError>;
}

/// Device position source. The controller applies the wait and staleness
/// bounds; implementations just report their best current fix.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_fix(&self) -> Result<DeviceFix, LocationError>;
}

#[async_trait]
impl ForecastApi for WeatherClient {
    async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        units: UnitSystem,
        location_label: &str,
    ) -> Result<WeatherSnapshot, WeatherError> {
        WeatherClient::fetch_forecast(self, coordinates, units, location_label).await
    }

    async fn geocode_city(&self, name: &str) -> Result<CityMatch, WeatherError> {
        WeatherClient::geocode_city(self, name).await
    }
}

#[async_trait]
impl SuggestionApi for AdviceClient {
    async fn request_suggestion(
        &self,
        snapshot: &WeatherSnapshot,
    ) -> Result<String, AdviceError> {
        AdviceClient::request_suggestion(self, snapshot).await
    }
}

/// Drives the three flows against the injected clients, one operation at a
/// time per flow. Every completion is applied through the state machine's
/// ticket guard.
pub struct PipelineController<F, S, L> {
    forecast: F,
    suggestions: S,
    location: L,
    state: PipelineState,
}

impl<F, S, L> PipelineController<F, S, L>
where
    F: ForecastApi,
    S: SuggestionApi,
    L: LocationSource,
{
    pub fn new(forecast: F, suggestions: S, location: L, units: UnitSystem) -> Self {
        Self {
            forecast,
            suggestions,
            location,
            state: PipelineState::new(units),
        }
    }

    #[must_use]
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Manual coordinate submission. Invalid input banners the weather flow
    /// without issuing any network call; the location label defaults to the
    /// coordinates as typed.
    pub async fn submit_coordinates(&mut self, latitude: &str, longitude: &str) {
        let Some(coordinates) = parse_coordinates(latitude, longitude) else {
            self.state
                .fail_location(INVALID_COORDINATES_MESSAGE.to_owned());
            return;
        };
        let label = format!("{}, {}", latitude.trim(), longitude.trim());
        self.run_weather(coordinates, label).await;
    }

    /// City search. A hit feeds the weather trigger with the joined display
    /// label; a miss banners only the city flow.
    pub async fn search_city(&mut self, name: &str) {
        let ticket = self.state.begin_city_search();
        let result = self.forecast.geocode_city(name).await;
        if let Some(hit) = self.state.apply_city_search(ticket, result) {
            let label = hit.display_label();
            self.run_weather(hit.coordinates(), label).await;
        }
    }

    /// Device location acquisition with the bounded wait and staleness
    /// checks, then the usual weather trigger.
    pub async fn locate_device(&mut self) {
        self.state.begin_locating();

        let outcome = tokio::time::timeout(LOCATION_WAIT, self.location.current_fix()).await;
        let fix = match outcome {
            Ok(Ok(fix)) if fix.age <= MAX_FIX_AGE => fix,
            Ok(Ok(_)) => {
                self.state.fail_location(LocationError::Expired.to_string());
                return;
            }
            Ok(Err(error)) => {
                self.state.fail_location(error.to_string());
                return;
            }
            Err(_) => {
                self.state.fail_location(LocationError::Timeout.to_string());
                return;
            }
        };

        let label = format!(
            "{:.4}, {:.4}",
            fix.coordinates.latitude, fix.coordinates.longitude
        );
        self.run_weather(fix.coordinates, label).await;
    }

    /// Unit toggle: re-issues the weather trigger with the new unit system
    /// and the previously resolved coordinates and label. A no-op until a
    /// location is resolved.
    pub async fn toggle_units(&mut self) {
        if let Some((coordinates, label)) = self.state.toggle_units() {
            self.run_weather(coordinates, label).await;
        }
    }

    async fn run_weather(&mut self, coordinates: Coordinates, label: String) {
        let ticket = self.state.begin_weather(coordinates, label.clone());
        let units = self.state.units();
        let result = self
            .forecast
            .fetch_forecast(coordinates, units, &label)
            .await;

        if let Some(dispatch) = self.state.apply_weather(ticket, result) {
            let outcome = self
                .suggestions
                .request_suggestion(&dispatch.snapshot)
                .await
                .map(|text| parser::parse(&text));
            self.state.apply_advice(dispatch.ticket, outcome);
        }
    }
}
