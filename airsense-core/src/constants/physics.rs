//! Physical constants for the humidity compensation math
//!
//! The compensator converts relative humidity into absolute humidity via the
//! Magnus (Clausius-Clapeyron) approximation of saturation vapor pressure.
//! The coefficient set below is the Alduchov-Eskridge fit, the same one used
//! throughout meteorological dew-point work; it is accurate to well under 1%
//! over the -40°C..+50°C range any indoor sensor will see.

/// Magnus saturation vapor pressure coefficient (hPa).
///
/// Vapor pressure at 0°C; the multiplier in
/// `svp = 6.112 * exp(17.625 * T / (243.04 + T))`.
pub const MAGNUS_PRESSURE_HPA: f32 = 6.112;

/// Magnus exponent numerator coefficient (dimensionless).
pub const MAGNUS_SLOPE: f32 = 17.625;

/// Magnus exponent denominator offset (°C).
pub const MAGNUS_OFFSET_C: f32 = 243.04;

/// Specific gas constant of water vapor (J/(kg·K)).
///
/// Divides saturation vapor pressure down to saturation vapor density via
/// the ideal gas law.
pub const WATER_VAPOR_GAS_CONSTANT: f32 = 461.52;

/// Offset from Celsius to Kelvin.
pub const CELSIUS_TO_KELVIN: f32 = 273.15;

/// hPa to Pa, needed because the Magnus fit is stated in hectopascals.
pub const HPA_TO_PA: f32 = 100.0;

/// Scale factor from `RH% x saturation density (kg/m³)` to the absolute
/// humidity figure the compensation slope was fitted against (g/m³ x 10⁻¹).
///
/// Empirical, inherited from the BME680 community compensation recipe: the
/// slope constant and this scale were tuned together and only make sense as
/// a pair.
pub const ABSOLUTE_HUMIDITY_SCALE: f32 = 10.0;
