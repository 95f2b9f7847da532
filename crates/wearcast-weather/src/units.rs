//! Pure display formatting for snapshot values.

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Convert a wind bearing in degrees to a 16-point compass direction.
///
/// Any real-valued angle is accepted; full turns wrap, so
/// `to_cardinal(d) == to_cardinal(d + 360.0)`.
#[must_use]
pub fn to_cardinal(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS[0];
    }
    let normalized = degrees.rem_euclid(360.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = ((normalized / 22.5).round() as usize) % COMPASS.len();
    COMPASS[index]
}

/// Render a temperature with its unit label, e.g. `"54°F"`.
#[must_use]
pub fn format_temperature(value: f64, unit: &str) -> String {
    format!("{value:.0}{unit}")
}

/// Render a wind reading with unit and compass direction, e.g. `"12 mph W"`.
#[must_use]
pub fn format_wind(speed: f64, unit: &str, direction_deg: f64) -> String {
    format!("{speed:.0} {unit} {}", to_cardinal(direction_deg))
}

/// Render a relative humidity percentage, e.g. `"81%"`.
#[must_use]
pub fn format_humidity(percent: f64) -> String {
    format!("{percent:.0}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_points() {
        assert_eq!(to_cardinal(0.0), "N");
        assert_eq!(to_cardinal(90.0), "E");
        assert_eq!(to_cardinal(180.0), "S");
        assert_eq!(to_cardinal(270.0), "W");
        assert_eq!(to_cardinal(45.0), "NE");
        assert_eq!(to_cardinal(292.5), "WNW");
    }

    #[test]
    fn cardinal_wraps_full_turns() {
        for degrees in [0.0, 37.0, 90.0, 181.5, 349.9] {
            for turns in [-2.0, -1.0, 1.0, 3.0] {
                assert_eq!(
                    to_cardinal(degrees),
                    to_cardinal(360.0f64.mul_add(turns, degrees)),
                    "degrees {degrees}, turns {turns}"
                );
            }
        }
    }

    #[test]
    fn cardinal_rounds_to_nearest_sector() {
        assert_eq!(to_cardinal(11.0), "N");
        assert_eq!(to_cardinal(12.0), "NNE");
        assert_eq!(to_cardinal(350.0), "N");
    }

    #[test]
    fn cardinal_tolerates_non_finite_input() {
        assert_eq!(to_cardinal(f64::NAN), "N");
        assert_eq!(to_cardinal(f64::INFINITY), "N");
    }

    #[test]
    fn formatting_rounds_to_whole_numbers() {
        assert_eq!(format_temperature(53.6, "°F"), "54°F");
        assert_eq!(format_wind(11.5, "mph", 270.0), "12 mph W");
        assert_eq!(format_humidity(80.6), "81%");
    }
}
