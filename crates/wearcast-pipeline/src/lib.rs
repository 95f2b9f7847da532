//! The location-to-weather-to-advice pipeline.
//!
//! Three sibling request flows (weather, advice, city search) each carry
//! their own status so one failing never forces another. The synchronous
//! [`PipelineState`] machine owns every transition and the supersession
//! guard; [`PipelineController`] drives it against real (or test) clients.

mod controller;
mod location;
mod state;
mod status;

pub use controller::{ForecastApi, LocationSource, PipelineController, SuggestionApi};
pub use location::{DeviceFix, LocationError, LOCATION_WAIT, MAX_FIX_AGE};
pub use state::{
    parse_coordinates, AdviceDispatch, AdviceTicket, CityTicket, PipelineState, ResolvedLocation,
    WeatherTicket, INVALID_COORDINATES_MESSAGE, NO_CITY_MATCH_MESSAGE,
};
pub use status::{Flow, Status};
