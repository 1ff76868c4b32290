//! Confidence grading thresholds
//!
//! The confidence grade is driven by two observables: how tightly the
//! calibration buffer has converged (its normalized min/max spread) and how
//! long the engine has survived in the Normal phase (decay intervals). The
//! cut points below are tuning, not physical law; they were chosen so that
//! a sensor in a stable room walks up one grade at a time.

/// Spread below which a Normal-phase reading is at least moderately
/// trustworthy (fraction, 0.075 = 7.5%).
pub const SPREAD_MODERATE_MAX: f32 = 0.075;

/// Spread required for the high-confidence grade (3.5%).
pub const SPREAD_HIGH_MAX: f32 = 0.035;

/// Spread required for the very-high-confidence grade (2.0%).
pub const SPREAD_VERY_HIGH_MAX: f32 = 0.020;

/// Decay intervals survived in Normal phase before high confidence.
pub const UPTIME_HIGH_INTERVALS: u32 = 2;

/// Decay intervals survived before very high confidence.
///
/// At the default 30-minute decay interval this is roughly two days of
/// continuous operation, which matches how long a metal-oxide element takes
/// to fully burn in after long storage.
pub const UPTIME_VERY_HIGH_INTERVALS: u32 = 100;
