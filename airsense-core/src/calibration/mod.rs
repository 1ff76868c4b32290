//! Adaptive gas calibration state machine
//!
//! ## Lifecycle
//!
//! A metal-oxide element is useless straight after power-on: the heater is
//! still warming, resistance plunges for tens of seconds, then claws its
//! way back up over minutes as the surface burns clean. The calibrator
//! tracks that lifecycle through three one-directional phases:
//!
//! - **Init** - readings are observed but never calibrated against. Once
//!   the minimum init time has passed, a trend tracker watches for the
//!   resistance curve to bottom out: three consecutive readings above the
//!   last local minimum end the phase.
//! - **Burn-In** - every compensated reading (clamped to the
//!   humidity-adjusted floor) is folded into the calibration buffer under
//!   the replace-smallest policy, greedily curating the highest readings
//!   seen so far into a first ceiling estimate. Ends when the minimum
//!   burn-in time has elapsed *and* the buffer is fully populated.
//! - **Normal** - the ceiling ratchets up whenever a reading beats it, and
//!   a decay timer force-rotates a fresh reading in every interval so the
//!   estimate tracks drift instead of fossilizing a long-gone high-water
//!   mark. Each completed decay interval increments the uptime counter the
//!   confidence grading feeds on.
//!
//! Readings above the configured sanity limit never reach this module's
//! `step`; the engine reports them via [`GasCalibrator::note_glitch`],
//! which pushes the phase timer back while stabilization is still running.
//!
//! Phase transitions only ever move forward. The sole way back to Init is
//! an explicit engine reset.

pub mod buffer;

pub use buffer::CalibrationBuffer;

use crate::compensation::CompensatedReading;
use crate::config::{CeilingPolicy, EngineConfig};
use crate::constants::calibration::STABLE_RISING_SAMPLES;
use crate::time::{delta_ms, Timestamp};
use crate::{log_debug, log_info};

/// Sensor lifecycle phase driving the calibration policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationPhase {
    /// Power-on instability; no calibration happens.
    Init,
    /// Thermal burn-in; the ceiling estimate is being built.
    BurnIn,
    /// Long-term operation; the ceiling ratchets and decays.
    Normal,
}

impl CalibrationPhase {
    /// Phase as the stable external index (0 = Init, 1 = Burn-In,
    /// 2 = Normal).
    pub fn index(self) -> u8 {
        match self {
            Self::Init => 0,
            Self::BurnIn => 1,
            Self::Normal => 2,
        }
    }
}

/// Init-phase trend tracker: the last local resistance minimum and how many
/// consecutive readings have come in above it.
#[derive(Debug, Clone, Copy)]
struct StabilizationTrend {
    last_low: f32,
    rising: u8,
}

/// The calibration state machine. Owns the calibration buffer and decides,
/// cycle by cycle, whether and how a reading updates the ceiling.
#[derive(Debug, Clone)]
pub struct GasCalibrator {
    phase: CalibrationPhase,

    /// Phase timer baseline; `None` until the first observed cycle.
    /// Glitch penalties push it forward, which lengthens the elapsed wait.
    phase_entered: Option<Timestamp>,

    /// Decay intervals survived in Normal phase. Never resets within
    /// Normal; cleared only by an engine reset.
    uptime_intervals: u32,

    trend: Option<StabilizationTrend>,

    buffer: CalibrationBuffer,
}

impl GasCalibrator {
    /// Creates a calibrator at the start of the Init phase.
    pub const fn new() -> Self {
        Self {
            phase: CalibrationPhase::Init,
            phase_entered: None,
            uptime_intervals: 0,
            trend: None,
            buffer: CalibrationBuffer::new(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> CalibrationPhase {
        self.phase
    }

    /// Clean-air ceiling estimate (Ω); 0.0 until the buffer is seeded.
    pub fn ceiling(&self) -> f32 {
        self.buffer.ceiling()
    }

    /// Normalized spread of the calibration buffer (1.0 = unpopulated).
    pub fn spread(&self) -> f32 {
        self.buffer.spread()
    }

    /// Decay intervals survived in the Normal phase.
    pub fn uptime_intervals(&self) -> u32 {
        self.uptime_intervals
    }

    /// Read access to the underlying calibration buffer.
    pub fn buffer(&self) -> &CalibrationBuffer {
        &self.buffer
    }

    /// Records that the engine rejected a glitch reading this cycle.
    ///
    /// During Init and Burn-In the phase timer baseline is pushed forward
    /// by `penalty_ms`, extending stabilization; in Normal phase glitches
    /// are simply dropped.
    pub fn note_glitch(&mut self, penalty_ms: u64, now: Timestamp) {
        let entered = self.phase_entered.get_or_insert(now);
        if self.phase != CalibrationPhase::Normal {
            *entered += penalty_ms;
            log_debug!(
                "glitch during {:?}: phase timer pushed back {}ms",
                self.phase,
                penalty_ms
            );
        }
    }

    /// Advances the state machine with one valid cycle.
    ///
    /// `raw_ohms` is the gas resistance as seen by the engine pipeline
    /// (after optional smoothing, before compensation); the trend tracker
    /// watches it directly. `comp` carries the humidity-compensated reading
    /// and floor.
    pub fn step(
        &mut self,
        raw_ohms: f32,
        comp: CompensatedReading,
        config: &EngineConfig,
        now: Timestamp,
    ) {
        let entered = *self.phase_entered.get_or_insert(now);
        let elapsed = delta_ms(entered, now);
        let timings = config.phase_timings();

        match self.phase {
            CalibrationPhase::Init => {
                if elapsed < timings.init_ms() {
                    return;
                }

                match &mut self.trend {
                    None => {
                        // First qualifying sample seeds the trend
                        self.trend = Some(StabilizationTrend {
                            last_low: raw_ohms,
                            rising: 0,
                        });
                    }
                    Some(trend) => {
                        if raw_ohms < trend.last_low {
                            // Still settling downward
                            trend.last_low = raw_ohms;
                            trend.rising = 0;
                        } else if raw_ohms > trend.last_low {
                            trend.rising += 1;
                            if trend.rising >= STABLE_RISING_SAMPLES {
                                self.enter(CalibrationPhase::BurnIn, now);
                            }
                        }
                    }
                }
            }

            CalibrationPhase::BurnIn => {
                if elapsed < timings.burnin_ms() || !self.buffer.is_full() {
                    let clamped = comp.gas_ohms.max(comp.floor_ohms);
                    self.buffer.update(clamped, true);
                }

                if elapsed >= timings.burnin_ms() && self.buffer.is_full() {
                    self.enter(CalibrationPhase::Normal, now);
                }
            }

            CalibrationPhase::Normal => {
                if comp.gas_ohms > comp.floor_ohms {
                    if comp.gas_ohms > self.buffer.ceiling() {
                        // Conditions genuinely improved: ratchet the ceiling
                        let replace =
                            config.ceiling_policy() == CeilingPolicy::ReplaceSmallest;
                        self.buffer.update(comp.gas_ohms, replace);
                    } else if elapsed >= timings.decay_ms() {
                        // Force the buffer to forget an old high-water mark
                        self.buffer.update(comp.gas_ohms, false);
                        self.phase_entered = Some(now);
                        self.uptime_intervals = self.uptime_intervals.saturating_add(1);
                        log_debug!(
                            "decay fold after {}ms, uptime {} intervals",
                            elapsed,
                            self.uptime_intervals
                        );
                    }
                }
            }
        }
    }

    /// Returns to the Init phase, dropping all calibration state.
    pub fn reset(&mut self) {
        self.phase = CalibrationPhase::Init;
        self.phase_entered = None;
        self.uptime_intervals = 0;
        self.trend = None;
        self.buffer.clear();
        log_info!("calibration reset to Init");
    }

    fn enter(&mut self, phase: CalibrationPhase, now: Timestamp) {
        log_info!("calibration phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_entered = Some(now);
        self.trend = None;
    }
}

impl Default for GasCalibrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compensation::CompensatedReading;
    use crate::constants::calibration::{CALIBRATION_SLOTS, GLITCH_PENALTY_MS};

    /// Short, floor-compliant timings so tests stay readable:
    /// init 1 s, burn-in 2 s, decay 62 s.
    fn test_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.set_phase_durations(1_000, 2_000, 62_000);
        config
    }

    fn comp(gas: f32) -> CompensatedReading {
        CompensatedReading {
            gas_ohms: gas,
            floor_ohms: 100_000.0,
        }
    }

    /// Drives a fresh calibrator through Init and Burn-In into Normal.
    /// Returns the calibrator and the timestamp of the last cycle.
    fn calibrator_in_normal(config: &EngineConfig) -> (GasCalibrator, Timestamp) {
        let mut cal = GasCalibrator::new();
        let mut now = 0;

        // Settle Init: seed + three rising readings after the minimum time
        cal.step(120_000.0, comp(120_000.0), config, now);
        for i in 0..4 {
            now = 1_000 + i * 1_000;
            cal.step(120_000.0 + i as f32 * 1_000.0, comp(150_000.0), config, now);
        }
        assert_eq!(cal.phase(), CalibrationPhase::BurnIn);

        // Fill the buffer and let the burn-in time elapse
        for _ in 0..=CALIBRATION_SLOTS {
            now += 1_000;
            cal.step(150_000.0, comp(150_000.0), config, now);
        }
        assert_eq!(cal.phase(), CalibrationPhase::Normal);

        (cal, now)
    }

    #[test]
    fn starts_in_init() {
        let cal = GasCalibrator::new();
        assert_eq!(cal.phase(), CalibrationPhase::Init);
        assert_eq!(cal.uptime_intervals(), 0);
        assert_eq!(cal.ceiling(), 0.0);
        assert_eq!(cal.spread(), 1.0);
    }

    #[test]
    fn init_ignores_readings_before_minimum_time() {
        let config = test_config();
        let mut cal = GasCalibrator::new();

        // Rising readings, but all inside the init window
        for i in 0..5 {
            cal.step(100_000.0 + i as f32, comp(120_000.0), &config, i * 100);
        }

        assert_eq!(cal.phase(), CalibrationPhase::Init);
        assert!(cal.buffer().is_empty());
    }

    #[test]
    fn init_ends_after_three_higher_lows() {
        let config = test_config();
        let mut cal = GasCalibrator::new();

        cal.step(100_000.0, comp(120_000.0), &config, 0);

        // Seeds the trend at 90k
        cal.step(90_000.0, comp(120_000.0), &config, 1_000);
        assert_eq!(cal.phase(), CalibrationPhase::Init);

        // Three consecutive readings above the seeded low
        cal.step(91_000.0, comp(120_000.0), &config, 2_000);
        cal.step(92_000.0, comp(120_000.0), &config, 3_000);
        assert_eq!(cal.phase(), CalibrationPhase::Init);
        cal.step(93_000.0, comp(120_000.0), &config, 4_000);

        assert_eq!(cal.phase(), CalibrationPhase::BurnIn);
    }

    #[test]
    fn falling_reading_restarts_the_trend() {
        let config = test_config();
        let mut cal = GasCalibrator::new();

        cal.step(100_000.0, comp(120_000.0), &config, 0);
        cal.step(90_000.0, comp(120_000.0), &config, 1_000); // seed
        cal.step(95_000.0, comp(120_000.0), &config, 2_000); // +1
        cal.step(96_000.0, comp(120_000.0), &config, 3_000); // +2

        // New local minimum resets the count
        cal.step(85_000.0, comp(120_000.0), &config, 4_000);
        cal.step(86_000.0, comp(120_000.0), &config, 5_000); // +1
        cal.step(87_000.0, comp(120_000.0), &config, 6_000); // +2
        assert_eq!(cal.phase(), CalibrationPhase::Init);

        cal.step(88_000.0, comp(120_000.0), &config, 7_000); // +3
        assert_eq!(cal.phase(), CalibrationPhase::BurnIn);
    }

    #[test]
    fn glitch_penalty_extends_init() {
        let config = test_config();
        let mut cal = GasCalibrator::new();

        cal.step(100_000.0, comp(120_000.0), &config, 0);

        // Two glitches push the timer baseline 2 s forward
        cal.note_glitch(GLITCH_PENALTY_MS, 100);
        cal.note_glitch(GLITCH_PENALTY_MS, 200);

        // At t=1s the init window would normally be over, but the penalty
        // keeps the trend tracker unseeded...
        cal.step(90_000.0, comp(120_000.0), &config, 1_000);
        cal.step(91_000.0, comp(120_000.0), &config, 1_500);
        cal.step(92_000.0, comp(120_000.0), &config, 2_000);
        cal.step(93_000.0, comp(120_000.0), &config, 2_500);
        assert_eq!(cal.phase(), CalibrationPhase::Init);

        // ...until the pushed-back window finally elapses
        cal.step(90_000.0, comp(120_000.0), &config, 3_000); // seed
        cal.step(91_000.0, comp(120_000.0), &config, 3_500);
        cal.step(92_000.0, comp(120_000.0), &config, 4_000);
        cal.step(93_000.0, comp(120_000.0), &config, 4_500);
        assert_eq!(cal.phase(), CalibrationPhase::BurnIn);
    }

    #[test]
    fn burnin_feeds_clamped_readings() {
        let config = test_config();
        let mut cal = GasCalibrator::new();

        cal.step(100_000.0, comp(120_000.0), &config, 0);
        cal.step(90_000.0, comp(120_000.0), &config, 1_000);
        for i in 0..3 {
            cal.step(91_000.0 + i as f32 * 1_000.0, comp(120_000.0), &config, 2_000 + i * 1_000);
        }
        assert_eq!(cal.phase(), CalibrationPhase::BurnIn);

        // A reading below the floor is clamped up to it
        cal.step(
            50_000.0,
            CompensatedReading { gas_ohms: 60_000.0, floor_ohms: 100_000.0 },
            &config,
            5_000,
        );
        assert_eq!(cal.ceiling(), 100_000.0);
    }

    #[test]
    fn burnin_requires_full_buffer_and_elapsed_time() {
        let config = test_config();
        let (cal, _) = calibrator_in_normal(&config);

        // Reached Normal only once both conditions held
        assert!(cal.buffer().is_full());
        assert_eq!(cal.phase(), CalibrationPhase::Normal);
    }

    #[test]
    fn normal_ratchets_ceiling_on_new_high() {
        let config = test_config();
        let (mut cal, now) = calibrator_in_normal(&config);

        let before = cal.ceiling();
        cal.step(200_000.0, comp(200_000.0), &config, now + 1_000);

        assert!(cal.ceiling() > before);
        // Ratchet folds do not count as decay intervals
        assert_eq!(cal.uptime_intervals(), 0);
    }

    #[test]
    fn normal_decay_rotates_and_counts_uptime() {
        let config = test_config();
        let (mut cal, now) = calibrator_in_normal(&config);

        // Below-ceiling reading before the decay interval: ignored
        cal.step(140_000.0, comp(140_000.0), &config, now + 1_000);
        assert_eq!(cal.uptime_intervals(), 0);

        // After the decay interval: folded in with rotation
        let ceiling_before = cal.ceiling();
        cal.step(140_000.0, comp(140_000.0), &config, now + 63_000);
        assert_eq!(cal.uptime_intervals(), 1);
        assert!(cal.ceiling() < ceiling_before);

        // Timer was rebased: the next below-ceiling reading waits again
        cal.step(140_000.0, comp(140_000.0), &config, now + 64_000);
        assert_eq!(cal.uptime_intervals(), 1);
    }

    #[test]
    fn normal_ignores_floor_level_readings() {
        let config = test_config();
        let (mut cal, now) = calibrator_in_normal(&config);

        let before = cal.ceiling();

        // Equal to the floor: no fold, even past the decay interval
        cal.step(
            90_000.0,
            CompensatedReading { gas_ohms: 100_000.0, floor_ohms: 100_000.0 },
            &config,
            now + 63_000,
        );
        assert_eq!(cal.ceiling(), before);
        assert_eq!(cal.uptime_intervals(), 0);
    }

    #[test]
    fn phases_never_regress() {
        let config = test_config();
        let (mut cal, now) = calibrator_in_normal(&config);

        // Wild but in-range inputs cannot push the phase backwards
        for i in 0..200 {
            let gas = if i % 2 == 0 { 30_000.0 } else { 170_000.0 };
            cal.step(gas, comp(gas), &config, now + 1_000 * (i + 1));
            assert_eq!(cal.phase(), CalibrationPhase::Normal);
        }
    }

    #[test]
    fn reset_returns_to_pristine_init() {
        let config = test_config();
        let (mut cal, _) = calibrator_in_normal(&config);

        cal.reset();

        assert_eq!(cal.phase(), CalibrationPhase::Init);
        assert_eq!(cal.uptime_intervals(), 0);
        assert_eq!(cal.ceiling(), 0.0);
        assert!(cal.buffer().is_empty());
    }
}
