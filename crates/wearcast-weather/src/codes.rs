//! Fixed lookup from WMO weather codes to display summaries.

/// Summary shown for any code the table does not cover.
pub const FALLBACK_SUMMARY: &str = "Variable conditions";

const SUMMARIES: [(i32, &str); 33] = [
    (0, "Clear sky"),
    (1, "Mostly clear"),
    (3, "Overcast"),
    (20, "Drizzle clearing"),
    (21, "Rain clearing"),
    (22, "Snow clearing"),
    (23, "Sleet clearing"),
    (24, "Freezing rain clearing"),
    (25, "Showers clearing"),
    (45, "Fog"),
    (48, "Freezing fog"),
    (51, "Light drizzle"),
    (53, "Drizzle"),
    (55, "Heavy drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Freezing drizzle"),
    (61, "Light rain"),
    (63, "Rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Freezing rain"),
    (71, "Light snow"),
    (73, "Snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Light rain showers"),
    (81, "Rain showers"),
    (82, "Violent rain showers"),
    (85, "Light snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with light hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Map a categorical weather code to its display summary.
///
/// Codes outside the table map to [`FALLBACK_SUMMARY`] rather than erroring.
#[must_use]
pub fn summary_for(code: i32) -> &'static str {
    SUMMARIES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map_or(FALLBACK_SUMMARY, |(_, summary)| *summary)
}
