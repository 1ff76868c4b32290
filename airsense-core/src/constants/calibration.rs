//! Calibration buffer and state-machine tuning

/// Number of slots in the gas calibration buffer.
///
/// One hundred retained readings is the reference tuning: large enough that
/// the ceiling mean is stable against single outliers, small enough to
/// refill within a few minutes at a 1 Hz cadence once the decay interval
/// starts rotating samples.
pub const CALIBRATION_SLOTS: usize = 100;

/// Consecutive higher-than-last-low readings that end the Init phase.
///
/// Raw resistance falls sharply right after power-on. Three consecutive
/// higher lows is the earliest trustworthy sign the curve has bottomed out.
pub const STABLE_RISING_SAMPLES: u8 = 3;

/// Phase-timer push-back applied when a glitch reading is rejected during
/// Init or Burn-In (ms). Extends stabilization instead of failing it.
pub const GLITCH_PENALTY_MS: u64 = 1_000;

/// Neutral IAQ score reported before the first ceiling estimate exists.
pub const NEUTRAL_IAQ: f32 = 50.0;

/// Slot capacity of each input range tracker.
///
/// Upper bound on the configurable smoothing window; fixes the tracker
/// footprint at construction time regardless of the configured length.
pub const SMOOTHING_CAPACITY: usize = 16;

/// Shortest meaningful smoothing window. A window of one would make the
/// Donchian midpoint the identity function.
pub const MIN_SMOOTHING_WINDOW: usize = 2;
