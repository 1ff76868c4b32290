//! Constants for the AirSense calibration engine
//!
//! Every tunable number in the engine lives here with its purpose and
//! provenance, grouped by domain:
//!
//! - **Physics**: Magnus/Clausius-Clapeyron coefficients for the humidity math
//! - **Sensors**: gas-resistance sanity limits and compensation slope
//! - **Calibration**: buffer sizing and state-machine tuning
//! - **Quality**: spread and uptime thresholds behind the confidence grades
//! - **Time**: phase duration defaults and their floors
//!
//! None of the calibration or quality values are physical law. They are
//! empirical tuning for metal-oxide gas sensors polled at roughly 1 Hz, and
//! the configuration surface exposes the ones operators actually adjust.

/// Magnus formula coefficients and other fixed physical quantities.
pub mod physics;

/// Gas-resistance sensor limits and the humidity compensation slope.
pub mod sensors;

/// Calibration buffer and state-machine tuning.
pub mod calibration;

/// Confidence grading thresholds.
pub mod quality;

/// Phase timing defaults, floors, and unit helpers.
pub mod time;

// Re-export commonly used constants for convenience
pub use sensors::{
    DEFAULT_HUMIDITY_SLOPE, DEFAULT_RESISTANCE_MIN_OHMS, DEFAULT_RESISTANCE_MAX_OHMS,
    RESISTANCE_LIMIT_FLOOR_OHMS, RESISTANCE_LIMIT_CEILING_OHMS,
};

pub use calibration::{
    CALIBRATION_SLOTS, STABLE_RISING_SAMPLES, GLITCH_PENALTY_MS, NEUTRAL_IAQ,
    SMOOTHING_CAPACITY, MIN_SMOOTHING_WINDOW,
};

pub use quality::{
    SPREAD_MODERATE_MAX, SPREAD_HIGH_MAX, SPREAD_VERY_HIGH_MAX,
    UPTIME_HIGH_INTERVALS, UPTIME_VERY_HIGH_INTERVALS,
};

pub use time::{
    MS_PER_SECOND, MS_PER_MINUTE,
    DEFAULT_INIT_MS, DEFAULT_BURNIN_MS, DEFAULT_DECAY_MS,
    BURNIN_LEAD_MS, DECAY_LEAD_MS,
};
