//! Numeric helpers shared by the fetch and rendering paths.

/// Absolute zero offset between Kelvin and Celsius.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Cut `value` down to at most `places` decimal digits by trimming its
/// decimal text representation. This truncates toward zero; it never rounds.
///
/// Negative zero comes back as `0.0`. Non-finite values are returned unchanged.
pub fn truncate_decimals(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let text = value.to_string();
    let kept = match text.split_once('.') {
        Some((int, frac)) if frac.len() > places => {
            if places == 0 {
                int.to_string()
            } else {
                format!("{int}.{}", &frac[..places])
            }
        }
        _ => return value + 0.0,
    };

    // `-0.001` cuts to `-0.00`; adding zero drops the sign.
    kept.parse::<f64>().map(|v| v + 0.0).unwrap_or(value)
}

/// Kelvin to whole degrees Celsius. Halves round toward positive infinity.
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET + 0.5).floor() as i64
}
