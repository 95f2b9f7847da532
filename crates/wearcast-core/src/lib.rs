mod config;
mod types;

pub use config::{
    build_relay_config, load_relay_config, load_relay_config_from_env, ConfigError, RelayConfig,
};
pub use types::{CityMatch, Coordinates, UnitSystem, WeatherSnapshot};
