/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_360(deg: f64) -> f64 {
    let wrapped = ((deg % 360.0) + 360.0) % 360.0;
    // -1e-18 % 360 + 360 rounds up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed rotation from `from` to `to` in degrees.
///
/// # Returns
/// - A value in `(-180, 180]`. Opposite headings resolve to `+180`.
pub fn angle_delta(from: f64, to: f64) -> f64 {
    let delta = wrap_360(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Bearing to a station from the radial the aircraft is currently on.
pub fn reciprocal(radial: f64) -> f64 { wrap_360(180.0 + radial) }

/// Converts an ADF relative bearing into a magnetic bearing using the aircraft heading.
pub fn relative_to_magnetic(relative: f64, heading: f64) -> f64 { wrap_360(relative + heading) }
