/// Kilometres per mile as used throughout the narration output.
///
/// Not the standard 1.60934; existing output depends on this exact figure.
pub const KM_PER_MILE: f64 = 1.61;

/// Convert a distance in metres to `(kilometres, miles)`.
pub fn to_km_miles(metres: f64) -> (f64, f64) {
    let km = metres / 1000.0;
    (km, km / KM_PER_MILE)
}

/// Split a duration in milliseconds into whole hours, minutes and seconds.
pub fn to_hms(millis: u64) -> (u64, u64, u64) {
    let seconds = millis / 1000;
    (seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

/// Distance in kilometres with one decimal, e.g. `1.2`.
pub fn format_km(metres: f64) -> String {
    format!("{:.1}", metres / 1000.0)
}
