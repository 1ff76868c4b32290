//! Engine configuration
//!
//! Everything an operator tunes lives in [`EngineConfig`], an explicit
//! value handed to the engine at construction - there is no global or
//! static configuration state. Setters validate synchronously and leave
//! prior state untouched on rejection, so a half-applied configuration
//! cannot exist.
//!
//! Two validation styles, matching how each knob fails in the field:
//!
//! - Resistance limits, slope, and smoothing parameters have hard
//!   envelopes; out-of-range requests are configuration mistakes and are
//!   rejected with a [`ConfigError`].
//! - Phase durations have ordering floors (burn-in must outlast init, the
//!   decay interval must outlast burn-in). Requests under a floor are
//!   silently raised to it: an operator shortening timings for a fast
//!   deployment should get the fastest *valid* schedule, not an error.

use crate::constants::calibration::{MIN_SMOOTHING_WINDOW, SMOOTHING_CAPACITY};
use crate::constants::sensors::{
    DEFAULT_HUMIDITY_SLOPE, DEFAULT_RESISTANCE_MAX_OHMS, DEFAULT_RESISTANCE_MIN_OHMS,
    HUMIDITY_SLOPE_MAX, RESISTANCE_LIMIT_CEILING_OHMS, RESISTANCE_LIMIT_FLOOR_OHMS,
};
use crate::constants::time::{
    BURNIN_LEAD_MS, DECAY_LEAD_MS, DEFAULT_BURNIN_MS, DEFAULT_DECAY_MS, DEFAULT_INIT_MS,
};
use crate::errors::{ConfigError, ConfigResult};

/// Insertion policy for Normal-phase ceiling-raising updates.
///
/// The calibration lineage diverges here: early revisions rotated new highs
/// into the buffer, later ones kept the replace-smallest curation active
/// for them as well. Both behaviors are legitimate, so the choice is a
/// policy knob rather than hardwired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CeilingPolicy {
    /// New highs displace the smallest retained reading (default; keeps
    /// the buffer biased toward the best air seen).
    #[default]
    ReplaceSmallest,
    /// New highs rotate in like any other sample, evicting the oldest.
    Rotate,
}

/// Minimum phase durations, floor-corrected at the setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseTimings {
    init_ms: u64,
    burnin_ms: u64,
    decay_ms: u64,
}

impl PhaseTimings {
    /// Minimum Init phase duration (ms).
    pub fn init_ms(&self) -> u64 {
        self.init_ms
    }

    /// Minimum Burn-In phase duration (ms).
    pub fn burnin_ms(&self) -> u64 {
        self.burnin_ms
    }

    /// Normal-phase ceiling decay interval (ms).
    pub fn decay_ms(&self) -> u64 {
        self.decay_ms
    }
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self {
            init_ms: DEFAULT_INIT_MS,
            burnin_ms: DEFAULT_BURNIN_MS,
            decay_ms: DEFAULT_DECAY_MS,
        }
    }
}

/// Input smoothing settings: one shared window length and an optional
/// range cap per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothingConfig {
    /// Lookback window length in samples, `2..=SMOOTHING_CAPACITY`.
    pub window: usize,

    /// Range cap for the temperature tracker (°C), if any.
    pub temperature_cap: Option<f32>,

    /// Range cap for the humidity tracker (%RH), if any.
    pub humidity_cap: Option<f32>,

    /// Range cap for the gas-resistance tracker (Ω), if any.
    pub gas_cap: Option<f32>,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: 8,
            temperature_cap: None,
            humidity_cap: None,
            gas_cap: None,
        }
    }
}

/// Complete engine configuration. Build with [`Default`] and adjust
/// through the validated setters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    slope: f32,
    resistance_min_ohms: u32,
    resistance_max_ohms: u32,
    timings: PhaseTimings,
    ceiling_policy: CeilingPolicy,
    smoothing: Option<SmoothingConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slope: DEFAULT_HUMIDITY_SLOPE,
            resistance_min_ohms: DEFAULT_RESISTANCE_MIN_OHMS,
            resistance_max_ohms: DEFAULT_RESISTANCE_MAX_OHMS,
            timings: PhaseTimings::default(),
            ceiling_policy: CeilingPolicy::default(),
            smoothing: None,
        }
    }
}

impl EngineConfig {
    /// Humidity compensation slope.
    pub fn slope(&self) -> f32 {
        self.slope
    }

    /// Lower gas-resistance bound: the clean-air floor (Ω).
    pub fn resistance_min_ohms(&self) -> u32 {
        self.resistance_min_ohms
    }

    /// Upper gas-resistance sanity bound (Ω).
    pub fn resistance_max_ohms(&self) -> u32 {
        self.resistance_max_ohms
    }

    /// Phase duration minimums.
    pub fn phase_timings(&self) -> PhaseTimings {
        self.timings
    }

    /// Normal-phase ceiling-raising insertion policy.
    pub fn ceiling_policy(&self) -> CeilingPolicy {
        self.ceiling_policy
    }

    /// Smoothing settings, or `None` when smoothing is disabled.
    pub fn smoothing(&self) -> Option<SmoothingConfig> {
        self.smoothing
    }

    /// Sets the humidity compensation slope.
    ///
    /// Rejects values that are not finite or outside `(0, 1]`.
    pub fn set_slope(&mut self, slope: f32) -> ConfigResult {
        if !slope.is_finite() || slope <= 0.0 || slope > HUMIDITY_SLOPE_MAX {
            return Err(ConfigError::SlopeOutOfRange { slope });
        }
        self.slope = slope;
        Ok(())
    }

    /// Sets the gas-resistance sanity limits (Ω).
    ///
    /// Rejects `min` below 30kΩ, `max` above 2MΩ, and inverted bounds.
    pub fn set_resistance_limits(&mut self, min: u32, max: u32) -> ConfigResult {
        if min < RESISTANCE_LIMIT_FLOOR_OHMS || max > RESISTANCE_LIMIT_CEILING_OHMS || min > max {
            return Err(ConfigError::ResistanceLimitsInvalid { min, max });
        }
        self.resistance_min_ohms = min;
        self.resistance_max_ohms = max;
        Ok(())
    }

    /// Sets the minimum phase durations (ms).
    ///
    /// Never fails: burn-in is silently raised to at least init + 1 s and
    /// the decay interval to at least burn-in + 60 s, so the stored
    /// schedule is always well-ordered.
    pub fn set_phase_durations(&mut self, init_ms: u64, burnin_ms: u64, decay_ms: u64) {
        let burnin_ms = burnin_ms.max(init_ms + BURNIN_LEAD_MS);
        let decay_ms = decay_ms.max(burnin_ms + DECAY_LEAD_MS);

        self.timings = PhaseTimings {
            init_ms,
            burnin_ms,
            decay_ms,
        };
    }

    /// Chooses the Normal-phase ceiling-raising insertion policy.
    pub fn set_ceiling_policy(&mut self, policy: CeilingPolicy) {
        self.ceiling_policy = policy;
    }

    /// Enables input smoothing with the given settings.
    ///
    /// Rejects windows outside `[2, SMOOTHING_CAPACITY]` and caps that are
    /// present but not positive and finite.
    pub fn enable_smoothing(&mut self, smoothing: SmoothingConfig) -> ConfigResult {
        if smoothing.window < MIN_SMOOTHING_WINDOW || smoothing.window > SMOOTHING_CAPACITY {
            return Err(ConfigError::WindowOutOfRange {
                window: smoothing.window,
                min: MIN_SMOOTHING_WINDOW,
                max: SMOOTHING_CAPACITY,
            });
        }

        for cap in [smoothing.temperature_cap, smoothing.humidity_cap, smoothing.gas_cap]
            .into_iter()
            .flatten()
        {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(ConfigError::RangeCapInvalid { cap });
            }
        }

        self.smoothing = Some(smoothing);
        Ok(())
    }

    /// Disables input smoothing.
    pub fn disable_smoothing(&mut self) {
        self.smoothing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tuning() {
        let config = EngineConfig::default();

        assert_eq!(config.slope(), DEFAULT_HUMIDITY_SLOPE);
        assert_eq!(config.resistance_min_ohms(), 100_000);
        assert_eq!(config.resistance_max_ohms(), 175_000);
        assert_eq!(config.phase_timings().init_ms(), 30_000);
        assert_eq!(config.phase_timings().burnin_ms(), 300_000);
        assert_eq!(config.phase_timings().decay_ms(), 1_800_000);
        assert_eq!(config.ceiling_policy(), CeilingPolicy::ReplaceSmallest);
        assert!(config.smoothing().is_none());
    }

    #[test]
    fn slope_rejections_leave_state_unchanged() {
        let mut config = EngineConfig::default();

        for bad in [0.0, -0.5, 1.5, f32::NAN, f32::INFINITY] {
            assert!(config.set_slope(bad).is_err());
            assert_eq!(config.slope(), DEFAULT_HUMIDITY_SLOPE);
        }

        assert!(config.set_slope(0.05).is_ok());
        assert_eq!(config.slope(), 0.05);
    }

    #[test]
    fn resistance_limit_envelope() {
        let mut config = EngineConfig::default();

        assert!(config.set_resistance_limits(29_999, 175_000).is_err());
        assert!(config.set_resistance_limits(100_000, 2_000_001).is_err());
        assert!(config.set_resistance_limits(200_000, 150_000).is_err());

        // Prior state intact after every rejection
        assert_eq!(config.resistance_min_ohms(), 100_000);
        assert_eq!(config.resistance_max_ohms(), 175_000);

        assert!(config.set_resistance_limits(50_000, 225_000).is_ok());
        assert_eq!(config.resistance_min_ohms(), 50_000);
        assert_eq!(config.resistance_max_ohms(), 225_000);
    }

    #[test]
    fn phase_durations_raise_to_floors() {
        let mut config = EngineConfig::default();

        // Everything under-range: raised, not rejected
        config.set_phase_durations(10_000, 0, 0);

        let timings = config.phase_timings();
        assert_eq!(timings.init_ms(), 10_000);
        assert_eq!(timings.burnin_ms(), 11_000);
        assert_eq!(timings.decay_ms(), 71_000);
    }

    #[test]
    fn phase_durations_above_floors_kept_verbatim() {
        let mut config = EngineConfig::default();

        config.set_phase_durations(20_000, 240_000, 900_000);

        let timings = config.phase_timings();
        assert_eq!(timings.init_ms(), 20_000);
        assert_eq!(timings.burnin_ms(), 240_000);
        assert_eq!(timings.decay_ms(), 900_000);
    }

    #[test]
    fn smoothing_window_envelope() {
        let mut config = EngineConfig::default();

        let mut smoothing = SmoothingConfig::default();
        smoothing.window = 1;
        assert!(config.enable_smoothing(smoothing).is_err());

        smoothing.window = SMOOTHING_CAPACITY + 1;
        assert!(config.enable_smoothing(smoothing).is_err());
        assert!(config.smoothing().is_none());

        smoothing.window = 8;
        assert!(config.enable_smoothing(smoothing).is_ok());
        assert_eq!(config.smoothing().unwrap().window, 8);
    }

    #[test]
    fn smoothing_caps_must_be_positive() {
        let mut config = EngineConfig::default();

        let smoothing = SmoothingConfig {
            window: 8,
            gas_cap: Some(-5_000.0),
            ..SmoothingConfig::default()
        };
        assert!(config.enable_smoothing(smoothing).is_err());

        let smoothing = SmoothingConfig {
            window: 8,
            gas_cap: Some(20_000.0),
            temperature_cap: Some(2.0),
            ..SmoothingConfig::default()
        };
        assert!(config.enable_smoothing(smoothing).is_ok());

        config.disable_smoothing();
        assert!(config.smoothing().is_none());
    }
}
