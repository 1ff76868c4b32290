//! Humidity compensation for gas-resistance readings
//!
//! ## Why compensate at all?
//!
//! The hot plate of a metal-oxide sensor reacts to water vapor almost as
//! strongly as to the VOCs it is supposed to measure: resistance falls
//! roughly exponentially with *absolute* humidity. Left uncorrected, a
//! humid afternoon reads as bad air and a dry winter morning as pristine,
//! regardless of what is actually in the room.
//!
//! The correction is the community-standard BME680 recipe:
//!
//! ```text
//! svd        = Magnus saturation vapor pressure / (R_v * T_kelvin)
//! abs_hum    = RH% * 10 * svd
//! factor     = exp(slope * abs_hum)
//! compensated = raw_resistance * factor
//! ```
//!
//! `slope` is an empirical fit (default 0.03), not derived from physics -
//! see the sensors constants module. The same factor is applied to the
//! configured minimum-resistance floor so that the floor rises in humid
//! conditions along with every reading compared against it.
//!
//! Everything here is a pure function of its inputs. If the exponential
//! overflows or an input was garbage, [`compensate`] returns `None` and the
//! caller discards the cycle without touching calibration state.

use libm::expf;

use crate::constants::physics::{
    ABSOLUTE_HUMIDITY_SCALE, CELSIUS_TO_KELVIN, HPA_TO_PA,
    MAGNUS_OFFSET_C, MAGNUS_PRESSURE_HPA, MAGNUS_SLOPE, WATER_VAPOR_GAS_CONSTANT,
};

/// A gas-resistance reading and floor with humidity influence removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompensatedReading {
    /// Humidity-compensated gas resistance (Ω)
    pub gas_ohms: f32,

    /// The configured minimum-resistance floor scaled by the same factor (Ω)
    pub floor_ohms: f32,
}

/// Saturation water vapor density at `temp_c` (kg/m³).
///
/// Magnus approximation of saturation vapor pressure, converted to density
/// through the ideal gas law. Equals the vapor content of air at 100% RH.
pub fn saturation_vapor_density(temp_c: f32) -> f32 {
    let svp_pa = MAGNUS_PRESSURE_HPA * HPA_TO_PA
        * expf(MAGNUS_SLOPE * temp_c / (MAGNUS_OFFSET_C + temp_c));

    svp_pa / (WATER_VAPOR_GAS_CONSTANT * (temp_c + CELSIUS_TO_KELVIN))
}

/// Absolute humidity figure the compensation slope was fitted against.
pub fn absolute_humidity(temp_c: f32, humidity_pct: f32) -> f32 {
    humidity_pct * ABSOLUTE_HUMIDITY_SCALE * saturation_vapor_density(temp_c)
}

/// Exponential correction factor for the current conditions.
pub fn humidity_factor(slope: f32, temp_c: f32, humidity_pct: f32) -> f32 {
    expf(slope * absolute_humidity(temp_c, humidity_pct))
}

/// Compensates a raw resistance reading and the resistance floor.
///
/// Returns `None` when either compensated value fails to be finite; the
/// caller must treat that as "this cycle never happened".
pub fn compensate(
    raw_ohms: f32,
    floor_ohms: f32,
    temp_c: f32,
    humidity_pct: f32,
    slope: f32,
) -> Option<CompensatedReading> {
    let factor = humidity_factor(slope, temp_c, humidity_pct);

    let gas_ohms = raw_ohms * factor;
    let adjusted_floor = floor_ohms * factor;

    if !gas_ohms.is_finite() || !adjusted_floor.is_finite() {
        return None;
    }

    Some(CompensatedReading {
        gas_ohms,
        floor_ohms: adjusted_floor,
    })
}
