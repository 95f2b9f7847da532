//! Device location acquisition seam.

use std::time::Duration;

use thiserror::Error;

use wearcast_core::Coordinates;

/// Bounded wait for a device fix before giving up.
pub const LOCATION_WAIT: Duration = Duration::from_secs(12);

/// A cached fix older than this must be replaced by a fresh one.
pub const MAX_FIX_AGE: Duration = Duration::from_secs(60);

/// A position reported by the device, with the age of the reading.
#[derive(Debug, Clone, Copy)]
pub struct DeviceFix {
    pub coordinates: Coordinates,
    pub age: Duration,
}

/// Failures acquiring a device position.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,

    #[error("location request timed out")]
    Timeout,

    #[error("location service unavailable")]
    Unavailable,

    #[error("cached location fix is too old")]
    Expired,
}
