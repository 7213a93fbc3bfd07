//! Kelvin to Celsius conversion

/// Offset between the Kelvin and Celsius scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Convert Kelvin to whole degrees Celsius, truncating toward zero.
///
/// NaN in gives NaN out; callers render it as-is.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    // + 0.0 folds -0.0 into 0.0
    (kelvin - KELVIN_OFFSET).trunc() + 0.0
}

/// Render a Celsius value produced by [`kelvin_to_celsius`].
pub fn format_celsius(celsius: f64) -> String {
    format!("{celsius}℃")
}
