//! Wet-bulb temperature from air temperature and relative humidity.
//!
//! Uses the Stull (2011) empirical fit. Humidity is sanitized so every term
//! stays defined, but a cell whose source temperature or humidity was
//! missing is always missing in the output.

use climate_common::ClimateResult;

use crate::types::GridField;

const KELVIN_OFFSET: f32 = 273.15;

/// Wet-bulb temperature in °C for one cell.
///
/// `t_kelvin` is near-surface air temperature, `rh_percent` relative
/// humidity in percent.
#[inline]
pub fn wet_bulb(t_kelvin: f32, rh_percent: f32) -> f32 {
    if t_kelvin.is_nan() || rh_percent.is_nan() {
        return f32::NAN;
    }

    let t = t_kelvin - KELVIN_OFFSET;
    let rh = sanitize_humidity(rh_percent);
    let radicand = (rh + 8.313659).max(0.0);

    t * (0.151977 * radicand.sqrt()).atan() + (t + rh).atan() - (rh - 1.676331).atan()
        + 0.00391838 * rh.powf(1.5) * (0.023101 * rh).atan()
        - 4.686035
}

/// NaN and -inf become 0, +inf becomes 100.
#[inline]
fn sanitize_humidity(rh: f32) -> f32 {
    if rh.is_nan() || rh == f32::NEG_INFINITY {
        0.0
    } else if rh == f32::INFINITY {
        100.0
    } else {
        rh
    }
}

/// Apply [`wet_bulb`] to co-registered temperature and humidity grids.
pub fn compute_wet_bulb(
    temperature: &GridField,
    humidity: &GridField,
) -> ClimateResult<GridField> {
    temperature.zip_with(humidity, wet_bulb)
}
