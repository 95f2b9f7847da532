mod render;

use std::time::Duration;

use async_trait::async_trait;
use clap::{Parser, ValueEnum};

use wearcast_advice::AdviceClient;
use wearcast_core::UnitSystem;
use wearcast_pipeline::{DeviceFix, LocationError, LocationSource, PipelineController};
use wearcast_weather::WeatherClient;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Parser)]
#[command(name = "wearcast")]
#[command(about = "Current weather and what to wear in it")]
struct Cli {
    /// City name to look up.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    city: Option<String>,

    /// Latitude in decimal degrees.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<String>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<String>,

    /// Measurement system for the forecast request.
    #[arg(long, value_enum, default_value_t = UnitsArg::Imperial)]
    units: UnitsArg,

    /// Relay base URL.
    #[arg(long, env = "WEARCAST_RELAY_URL", default_value = "http://localhost:8989")]
    relay: String,

    /// Keep running and ping the relay heartbeat until interrupted.
    #[arg(long)]
    keep_alive: bool,

    /// Heartbeat interval in seconds (with --keep-alive).
    #[arg(long, env = "WEARCAST_HEARTBEAT_INTERVAL_SECS", default_value_t = 300)]
    heartbeat_interval_secs: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnitsArg {
    Imperial,
    Metric,
}

impl From<UnitsArg> for UnitSystem {
    fn from(value: UnitsArg) -> Self {
        match value {
            UnitsArg::Imperial => UnitSystem::Imperial,
            UnitsArg::Metric => UnitSystem::Metric,
        }
    }
}

/// Terminals have no positioning hardware; the pipeline's geolocation seam
/// reports that honestly and the user falls back to --city or --lat/--lon.
struct NoDeviceLocation;

#[async_trait]
impl LocationSource for NoDeviceLocation {
    async fn current_fix(&self) -> Result<DeviceFix, LocationError> {
        Err(LocationError::Unavailable)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let forecast = WeatherClient::new(REQUEST_TIMEOUT_SECS)?;
    let suggestions = AdviceClient::new(&cli.relay, REQUEST_TIMEOUT_SECS)?;
    let mut pipeline = PipelineController::new(
        forecast,
        suggestions,
        NoDeviceLocation,
        cli.units.into(),
    );

    match (&cli.city, &cli.lat, &cli.lon) {
        (Some(city), _, _) => pipeline.search_city(city).await,
        (None, Some(lat), Some(lon)) => pipeline.submit_coordinates(lat, lon).await,
        _ => pipeline.locate_device().await,
    }

    render::render(pipeline.state());

    if cli.keep_alive {
        let _scheduler = wearcast_advice::heartbeat::start_heartbeat(
            cli.relay.clone(),
            Duration::from_secs(cli.heartbeat_interval_secs),
        )
        .await?;
        println!("\nkeeping the relay warm; press ctrl-c to exit");
        tokio::signal::ctrl_c().await?;
    }

    Ok(())
}
