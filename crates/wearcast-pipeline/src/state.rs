//! The synchronous pipeline state machine.
//!
//! All transitions live here, decoupled from I/O so they can be tested
//! without a network. Requests are tagged with a sequence number at
//! dispatch; a completion only applies when its ticket still matches the
//! flow's latest dispatched number, so an out-of-order response from a
//! superseded request is discarded instead of overwriting newer state.

use wearcast_advice::{AdviceError, AdviceItem};
use wearcast_core::{CityMatch, Coordinates, UnitSystem, WeatherSnapshot};
use wearcast_weather::WeatherError;

use crate::status::{Flow, Status};

/// Shown when a manual coordinate submission does not parse or is out of
/// range.
pub const INVALID_COORDINATES_MESSAGE: &str = "Enter a valid latitude and longitude.";

/// Shown when a city search returns zero results.
pub const NO_CITY_MATCH_MESSAGE: &str = "No matching city found.";

/// The place the pipeline last resolved, re-used by the unit toggle.
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub label: String,
}

/// Identifies one dispatched weather request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherTicket(u64);

/// Identifies one dispatched advice request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceTicket(u64);

/// Identifies one dispatched city search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityTicket(u64);

/// Everything the driver needs to launch the advice call that follows a
/// successful forecast.
#[derive(Debug)]
pub struct AdviceDispatch {
    pub ticket: AdviceTicket,
    pub snapshot: WeatherSnapshot,
}

/// The three sibling flows plus the resolved location and unit system.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub weather: Flow<WeatherSnapshot>,
    pub advice: Flow<Vec<AdviceItem>>,
    pub city: Flow<CityMatch>,
    resolved: Option<ResolvedLocation>,
    units: UnitSystem,
    weather_seq: u64,
    advice_seq: u64,
    city_seq: u64,
}

impl PipelineState {
    #[must_use]
    pub fn new(units: UnitSystem) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedLocation> {
        self.resolved.as_ref()
    }

    /// Device acquisition started: weather flow shows `Locating`.
    pub fn begin_locating(&mut self) {
        self.weather.status = Status::Locating;
        self.weather.error = None;
    }

    /// A location trigger failed before any fetch (validation, geolocation).
    pub fn fail_location(&mut self, message: String) {
        self.weather.fail(message);
    }

    /// Record the location for the upcoming fetch and arm the weather flow.
    ///
    /// Runs before the forecast call: the advice flow is cleared to `Idle`
    /// here so a superseded location can never keep showing stale advice,
    /// and any in-flight advice request is invalidated.
    pub fn begin_weather(&mut self, coordinates: Coordinates, label: String) -> WeatherTicket {
        self.resolved = Some(ResolvedLocation { coordinates, label });
        self.weather.loading();
        self.advice.reset();
        self.advice_seq += 1;
        self.weather_seq += 1;
        WeatherTicket(self.weather_seq)
    }

    /// Apply a forecast completion.
    ///
    /// A stale ticket is discarded silently. A fresh success replaces the
    /// snapshot and arms the advice flow, returning what the driver needs to
    /// launch the suggestion call; a fresh failure banners the weather flow
    /// and leaves advice at `Idle`.
    pub fn apply_weather(
        &mut self,
        ticket: WeatherTicket,
        result: Result<WeatherSnapshot, WeatherError>,
    ) -> Option<AdviceDispatch> {
        if ticket.0 != self.weather_seq {
            tracing::debug!(ticket = ticket.0, current = self.weather_seq, "discarding stale weather response");
            return None;
        }

        match result {
            Ok(snapshot) => {
                self.weather.ready(snapshot.clone());
                self.advice.loading();
                self.advice_seq += 1;
                Some(AdviceDispatch {
                    ticket: AdviceTicket(self.advice_seq),
                    snapshot,
                })
            }
            Err(error) => {
                tracing::warn!(%error, "forecast fetch failed");
                self.weather.fail(error.to_string());
                None
            }
        }
    }

    /// Apply an advice completion. Stale tickets are discarded; a failure
    /// keeps previously displayed rows under the error banner.
    pub fn apply_advice(
        &mut self,
        ticket: AdviceTicket,
        result: Result<Vec<AdviceItem>, AdviceError>,
    ) {
        if ticket.0 != self.advice_seq {
            tracing::debug!(ticket = ticket.0, current = self.advice_seq, "discarding stale advice response");
            return;
        }

        match result {
            Ok(items) => self.advice.ready(items),
            Err(error) => {
                tracing::warn!(%error, "suggestion fetch failed");
                self.advice.fail(error.to_string());
            }
        }
    }

    /// City search dispatched; independent of the weather and advice flows.
    pub fn begin_city_search(&mut self) -> CityTicket {
        self.city.loading();
        self.city_seq += 1;
        CityTicket(self.city_seq)
    }

    /// Apply a city search completion. A fresh success is returned so the
    /// driver can feed it into the weather trigger.
    pub fn apply_city_search(
        &mut self,
        ticket: CityTicket,
        result: Result<CityMatch, WeatherError>,
    ) -> Option<CityMatch> {
        if ticket.0 != self.city_seq {
            tracing::debug!(ticket = ticket.0, current = self.city_seq, "discarding stale city search response");
            return None;
        }

        match result {
            Ok(hit) => {
                self.city.ready(hit.clone());
                Some(hit)
            }
            Err(WeatherError::NotFound) => {
                self.city.fail(NO_CITY_MATCH_MESSAGE.to_owned());
                None
            }
            Err(error) => {
                tracing::warn!(%error, "city search failed");
                self.city.fail(error.to_string());
                None
            }
        }
    }

    /// Flip the unit system. Returns the re-fetch target when a location is
    /// already resolved; before that, toggling only changes the preference.
    pub fn toggle_units(&mut self) -> Option<(Coordinates, String)> {
        self.units = self.units.toggled();
        self.resolved
            .as_ref()
            .map(|resolved| (resolved.coordinates, resolved.label.clone()))
    }
}

/// Parse and range-check manual coordinate input.
#[must_use]
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Option<Coordinates> {
    let latitude = latitude.trim().parse::<f64>().ok()?;
    let longitude = longitude.trim().parse::<f64>().ok()?;
    let coordinates = Coordinates {
        latitude,
        longitude,
    };
    coordinates.in_range().then_some(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    fn snapshot(label: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            summary: "Overcast".to_string(),
            summary_code: 3,
            temperature: 54.0,
            feels_like: 51.0,
            humidity: 81.0,
            wind_speed: 12.0,
            wind_direction_deg: 290.0,
            temperature_unit: "°F".to_string(),
            wind_unit: "mph".to_string(),
            observed_at: "2025-03-01T14:00".to_string(),
            timezone: "America/Los_Angeles".to_string(),
            location: label.to_string(),
        }
    }

    fn coords(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates {
            latitude,
            longitude,
        }
    }

    fn items(text: &str) -> Vec<AdviceItem> {
        vec![AdviceItem {
            label: None,
            text: text.to_string(),
        }]
    }

    #[test]
    fn weather_trigger_moves_idle_to_loading_to_ready() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        assert_eq!(state.weather.status, Status::Idle);

        let ticket = state.begin_weather(coords(37.0, -122.0), "37, -122".to_string());
        assert_eq!(state.weather.status, Status::Loading);

        let dispatch = state.apply_weather(ticket, Ok(snapshot("37, -122")));
        assert_eq!(state.weather.status, Status::Ready);
        assert!(dispatch.is_some());
        assert_eq!(state.advice.status, Status::Loading);
    }

    #[test]
    fn weather_trigger_clears_prior_advice_before_fetch() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        let ticket = state.begin_weather(coords(1.0, 2.0), "a".to_string());
        let dispatch = state.apply_weather(ticket, Ok(snapshot("a"))).expect("dispatch");
        state.apply_advice(dispatch.ticket, Ok(items("old advice")));
        assert_eq!(state.advice.status, Status::Ready);

        // New location: advice must be back at Idle with nothing to show
        // before the forecast even completes.
        state.begin_weather(coords(3.0, 4.0), "b".to_string());
        assert_eq!(state.advice.status, Status::Idle);
        assert!(state.advice.value.is_none());
        assert!(state.advice.error.is_none());
    }

    #[test]
    fn forecast_failure_banners_weather_and_never_starts_advice() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        let ticket = state.begin_weather(coords(1.0, 2.0), "a".to_string());
        let dispatch = state.apply_weather(ticket, Err(WeatherError::Upstream(503)));

        assert!(dispatch.is_none());
        assert_eq!(state.weather.status, Status::Error);
        assert!(state
            .weather
            .error
            .as_deref()
            .is_some_and(|message| message.contains("503")));
        assert_eq!(state.advice.status, Status::Idle);
        assert!(state.advice.value.is_none());
    }

    #[test]
    fn stale_weather_response_is_discarded() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        let first = state.begin_weather(coords(1.0, 2.0), "first".to_string());
        let second = state.begin_weather(coords(3.0, 4.0), "second".to_string());

        // The superseded request completes late; nothing may change.
        let dispatch = state.apply_weather(first, Ok(snapshot("first")));
        assert!(dispatch.is_none());
        assert_eq!(state.weather.status, Status::Loading);
        assert!(state.weather.value.is_none());

        let dispatch = state.apply_weather(second, Ok(snapshot("second")));
        assert!(dispatch.is_some());
        assert_eq!(
            state.weather.value.as_ref().map(|s| s.location.as_str()),
            Some("second")
        );
    }

    #[test]
    fn stale_advice_response_is_discarded_after_new_weather_trigger() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        let ticket = state.begin_weather(coords(1.0, 2.0), "a".to_string());
        let dispatch = state.apply_weather(ticket, Ok(snapshot("a"))).expect("dispatch");

        // A newer location supersedes the in-flight advice request.
        state.begin_weather(coords(3.0, 4.0), "b".to_string());

        state.apply_advice(dispatch.ticket, Ok(items("stale")));
        assert_eq!(state.advice.status, Status::Idle);
        assert!(state.advice.value.is_none());
    }

    #[test]
    fn advice_failure_keeps_prior_rows_under_the_banner() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        let ticket = state.begin_weather(coords(1.0, 2.0), "a".to_string());
        let dispatch = state.apply_weather(ticket, Ok(snapshot("a"))).expect("dispatch");

        state.apply_advice(
            dispatch.ticket,
            Err(AdviceError::Suggestion("relay down".to_string())),
        );
        assert_eq!(state.advice.status, Status::Error);
        assert_eq!(state.advice.error.as_deref(), Some("relay down"));
    }

    #[test]
    fn city_search_failure_does_not_touch_weather() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        let ticket = state.begin_weather(coords(1.0, 2.0), "a".to_string());
        state.apply_weather(ticket, Ok(snapshot("a")));

        let city_ticket = state.begin_city_search();
        let hit = state.apply_city_search(city_ticket, Err(WeatherError::NotFound));

        assert!(hit.is_none());
        assert_eq!(state.city.status, Status::Error);
        assert_eq!(state.city.error.as_deref(), Some(NO_CITY_MATCH_MESSAGE));
        assert_eq!(state.weather.status, Status::Ready);
        assert!(state.weather.value.is_some());
    }

    #[test]
    fn stale_city_response_is_discarded() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        let first = state.begin_city_search();
        let second = state.begin_city_search();

        let hit = CityMatch {
            name: "Lisbon".to_string(),
            admin1: None,
            country: Some("Portugal".to_string()),
            latitude: 38.7,
            longitude: -9.1,
        };
        assert!(state.apply_city_search(first, Ok(hit.clone())).is_none());
        assert!(state.apply_city_search(second, Ok(hit)).is_some());
    }

    #[test]
    fn toggle_before_any_location_changes_preference_only() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        assert!(state.toggle_units().is_none());
        assert_eq!(state.units(), UnitSystem::Metric);
        assert_eq!(state.weather.status, Status::Idle);
    }

    #[test]
    fn toggle_after_resolution_returns_same_coordinates() {
        let mut state = PipelineState::new(UnitSystem::Imperial);
        let ticket = state.begin_weather(coords(37.7749, -122.4194), "SF".to_string());
        state.apply_weather(ticket, Ok(snapshot("SF")));

        let target = state.toggle_units().expect("resolved location");
        assert_eq!(state.units(), UnitSystem::Metric);
        assert!((target.0.latitude - 37.7749).abs() < f64::EPSILON);
        assert!((target.0.longitude - -122.4194).abs() < f64::EPSILON);
        assert_eq!(target.1, "SF");
    }

    #[test]
    fn parse_coordinates_accepts_decimal_strings() {
        let coords = parse_coordinates("37.7749", "-122.4194").expect("valid");
        assert!((coords.latitude - 37.7749).abs() < f64::EPSILON);
        assert!((coords.longitude - -122.4194).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_coordinates_rejects_garbage_and_out_of_range() {
        assert!(parse_coordinates("abc", "-122.4194").is_none());
        assert!(parse_coordinates("37.7749", "").is_none());
        assert!(parse_coordinates("91", "0").is_none());
        assert!(parse_coordinates("0", "181").is_none());
        assert!(parse_coordinates("nan", "0").is_none());
    }
}
