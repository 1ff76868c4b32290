//! Top-level IAQ engine
//!
//! Wires the per-cycle data flow together:
//!
//! ```text
//! raw sample -> [range smoothing] -> humidity compensation
//!            -> calibration state machine -> score + confidence
//! ```
//!
//! One synchronous [`IaqEngine::process`] call per polling cycle, from a
//! single caller-owned loop (roughly 1 Hz is what the default phase
//! timings assume). The engine owns all of its state exclusively - the
//! calibrator with its buffer, and up to three range trackers - and all of
//! it is fixed-size and allocated at construction, so the engine is safe
//! for fixed-footprint embedded deployments.
//!
//! Nothing in here can fail fatally. Non-finite inputs and sensor glitches
//! degrade to "hold the last known good output"; there is no operator to
//! intervene on an unattended device, so the engine never surfaces a
//! runtime error or panics.

use crate::calibration::{CalibrationPhase, GasCalibrator};
use crate::compensation::compensate;
use crate::config::EngineConfig;
use crate::constants::calibration::{GLITCH_PENALTY_MS, NEUTRAL_IAQ, SMOOTHING_CAPACITY};
use crate::log_debug;
use crate::score::{confidence, quality_score, Confidence};
use crate::smoothing::RangeTracker;
use crate::time::Timestamp;

/// One cycle's worth of raw sensor inputs.
///
/// Plain data - acquisition (I2C/SPI sequencing, conversion timing) is a
/// collaborator's problem, which keeps the engine fully testable off
/// hardware.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample {
    /// Ambient temperature (°C)
    pub temperature_c: f32,

    /// Relative humidity (%RH, 0-100)
    pub humidity_pct: f32,

    /// Raw gas resistance (Ω, non-negative)
    pub gas_resistance_ohms: f32,
}

impl SensorSample {
    fn is_usable(&self) -> bool {
        self.temperature_c.is_finite()
            && self.humidity_pct.is_finite()
            && self.gas_resistance_ohms.is_finite()
            && self.gas_resistance_ohms >= 0.0
    }
}

/// Engine output after a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IaqReading {
    /// Relative air quality, 0 (bad) to 100 (clean-air ceiling)
    pub iaq: f32,

    /// How much to trust `iaq` right now
    pub confidence: Confidence,

    /// Current calibration phase
    pub phase: CalibrationPhase,

    /// Calibration accuracy percentage, `(1 - spread) * 100`
    pub accuracy_pct: f32,
}

/// Per-channel range trackers, present only when smoothing is enabled.
#[derive(Debug, Clone)]
struct ChannelSmoothers {
    temperature: RangeTracker<SMOOTHING_CAPACITY>,
    humidity: RangeTracker<SMOOTHING_CAPACITY>,
    gas: RangeTracker<SMOOTHING_CAPACITY>,
}

impl ChannelSmoothers {
    fn from_config(config: &EngineConfig) -> Option<Self> {
        let smoothing = config.smoothing()?;

        let tracker = |cap: Option<f32>| {
            let t = RangeTracker::new(smoothing.window);
            match cap {
                Some(cap) => t.with_range_cap(cap),
                None => t,
            }
        };

        Some(Self {
            temperature: tracker(smoothing.temperature_cap),
            humidity: tracker(smoothing.humidity_cap),
            gas: tracker(smoothing.gas_cap),
        })
    }
}

/// The adaptive IAQ calibration engine.
#[derive(Debug, Clone)]
pub struct IaqEngine {
    config: EngineConfig,
    calibrator: GasCalibrator,
    smoothers: Option<ChannelSmoothers>,
    iaq: f32,
}

impl IaqEngine {
    /// Builds an engine from a validated configuration. All buffers are
    /// sized here; no allocation happens afterwards.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            smoothers: ChannelSmoothers::from_config(&config),
            config,
            calibrator: GasCalibrator::new(),
            iaq: NEUTRAL_IAQ,
        }
    }

    /// Runs one full calibration cycle and returns the updated output.
    ///
    /// `now` is the caller's clock in milliseconds; it must be
    /// monotonically non-decreasing across calls. Malformed samples and
    /// out-of-range glitches leave all state untouched except, for
    /// glitches during stabilization, the phase timer penalty.
    pub fn process(&mut self, sample: SensorSample, now: Timestamp) -> IaqReading {
        if !sample.is_usable() {
            log_debug!("discarding non-finite sample {:?}", sample);
            return self.reading();
        }

        // Sanity limit applies to the raw reading, before it can reach the
        // smoothing windows.
        if sample.gas_resistance_ohms > self.config.resistance_max_ohms() as f32 {
            log_debug!(
                "glitch: {}Ω above sanity limit {}Ω",
                sample.gas_resistance_ohms,
                self.config.resistance_max_ohms()
            );
            self.calibrator.note_glitch(GLITCH_PENALTY_MS, now);
            return self.reading();
        }

        let (temp, hum, gas) = match &mut self.smoothers {
            Some(smoothers) => (
                smoothers.temperature.track(sample.temperature_c).average,
                smoothers.humidity.track(sample.humidity_pct).average,
                smoothers.gas.track(sample.gas_resistance_ohms).average,
            ),
            None => (
                sample.temperature_c,
                sample.humidity_pct,
                sample.gas_resistance_ohms,
            ),
        };

        let Some(comp) = compensate(
            gas,
            self.config.resistance_min_ohms() as f32,
            temp,
            hum,
            self.config.slope(),
        ) else {
            // Exponential blew up (e.g. absurd humidity input): this
            // cycle never happened.
            log_debug!("discarding cycle: compensation not finite");
            return self.reading();
        };

        self.calibrator.step(gas, comp, &self.config, now);

        // Score against the ceiling, clamped up to the humidity-adjusted
        // floor; hold the previous score until the ceiling is seeded.
        let clamped = comp.gas_ohms.max(comp.floor_ohms);
        if let Some(score) = quality_score(clamped, self.calibrator.ceiling()) {
            self.iaq = score;
        }

        self.reading()
    }

    /// Output of the most recent cycle (neutral defaults before the
    /// first).
    pub fn reading(&self) -> IaqReading {
        IaqReading {
            iaq: self.iaq,
            confidence: self.confidence(),
            phase: self.calibrator.phase(),
            accuracy_pct: (1.0 - self.calibrator.spread()) * 100.0,
        }
    }

    /// Last IAQ score (neutral 50 until the ceiling is seeded).
    pub fn iaq(&self) -> f32 {
        self.iaq
    }

    /// Confidence grade for the current score.
    pub fn confidence(&self) -> Confidence {
        confidence(
            self.calibrator.phase(),
            self.calibrator.spread(),
            self.calibrator.uptime_intervals(),
        )
    }

    /// Current calibration phase.
    pub fn phase(&self) -> CalibrationPhase {
        self.calibrator.phase()
    }

    /// Current clean-air ceiling estimate (Ω); 0 until seeded.
    pub fn ceiling(&self) -> f32 {
        self.calibrator.ceiling()
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drops all adaptive state and restarts the lifecycle at Init.
    pub fn reset(&mut self) {
        self.calibrator.reset();
        self.smoothers = ChannelSmoothers::from_config(&self.config);
        self.iaq = NEUTRAL_IAQ;
    }
}
