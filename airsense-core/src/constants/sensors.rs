//! Gas-resistance sensor limits and compensation tuning
//!
//! Metal-oxide gas sensors report a heated-plate resistance that rises in
//! clean air and collapses when VOCs are present. Datasheet "typical" ranges
//! are wide (50Ω to 50kΩ for the raw element), but in practice a healthy
//! indoor sensor settles in the low hundreds of kΩ, which is where the
//! defaults below come from.

/// Default lower resistance bound (Ω) used as the clean-air floor.
///
/// Compensated readings are clamped up to (the humidity-adjusted version
/// of) this floor before they reach calibration or scoring, so a single
/// deep VOC spike cannot drag the ceiling estimate down.
pub const DEFAULT_RESISTANCE_MIN_OHMS: u32 = 100_000;

/// Default upper resistance sanity bound (Ω).
///
/// Raw readings above this are treated as sensor glitches, not air quality:
/// open-circuit transients and heater warm-up spikes land up here. Raising
/// the bound lengthens stabilization; deployments with unusually
/// high-resistance sensors tune it up toward ~225kΩ.
pub const DEFAULT_RESISTANCE_MAX_OHMS: u32 = 175_000;

/// Lowest lower-bound an operator may configure (Ω).
///
/// Below ~30kΩ the floor would sit inside the sensor's polluted-air range
/// and the score would rail at 100 in dirty air.
pub const RESISTANCE_LIMIT_FLOOR_OHMS: u32 = 30_000;

/// Highest upper-bound an operator may configure (Ω).
pub const RESISTANCE_LIMIT_CEILING_OHMS: u32 = 2_000_000;

/// Default humidity compensation slope.
///
/// Magic constant: empirically fitted against BME680-class sensors, not
/// derived. The exponential `exp(slope * absolute_humidity)` removes the
/// resistance drop that humid air causes on the hot plate.
pub const DEFAULT_HUMIDITY_SLOPE: f32 = 0.03;

/// Largest accepted compensation slope.
///
/// A slope of 1.0 already corresponds to an implausibly humidity-dominated
/// sensor; anything beyond it is a configuration mistake.
pub const HUMIDITY_SLOPE_MAX: f32 = 1.0;
