//! IAQ scoring and confidence grading
//!
//! The score is a relative, unitless quality index: compensated gas
//! resistance normalized against the calibration ceiling and squared.
//! The square stretches the top of the scale - air close to the ceiling
//! reads near 100 while moderate drops fall off quickly, which matches how
//! perceived stuffiness behaves. This is *not* a gas concentration; see the
//! crate docs.
//!
//! The confidence grade states how much the score should be trusted, from
//! 0 (unreliable, still in Init) to 4 (very high, ceiling converged and the
//! engine has survived many decay intervals). Thresholds are tunable
//! constants in the quality constants module, evaluated tightest-first so
//! the strictest satisfied grade wins.

use crate::calibration::CalibrationPhase;
use crate::constants::quality::{
    SPREAD_HIGH_MAX, SPREAD_MODERATE_MAX, SPREAD_VERY_HIGH_MAX,
    UPTIME_HIGH_INTERVALS, UPTIME_VERY_HIGH_INTERVALS,
};

/// How trustworthy the current IAQ score is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Confidence {
    /// Init phase: the sensor has not stabilized, ignore the score.
    Unreliable,
    /// Burn-in, or a Normal-phase buffer that has not converged.
    Low,
    /// Ceiling spread under 7.5%.
    Moderate,
    /// Spread under 3.5% and at least 2 decay intervals survived.
    High,
    /// Spread under 2.0% and at least 100 decay intervals survived.
    VeryHigh,
}

impl Confidence {
    /// Grade as the stable external integer (0 = unreliable .. 4 = very
    /// high).
    pub fn grade(self) -> u8 {
        match self {
            Self::Unreliable => 0,
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
            Self::VeryHigh => 4,
        }
    }
}

/// Quality score for a compensated reading against the current ceiling.
///
/// `min(100, (r/c)² * 100)`. Returns `None` while the ceiling is unseeded
/// (`c <= 0`); the engine holds its previous score in that case.
pub fn quality_score(compensated_ohms: f32, ceiling_ohms: f32) -> Option<f32> {
    if ceiling_ohms <= 0.0 {
        return None;
    }

    let ratio = compensated_ohms / ceiling_ohms;
    Some((ratio * ratio * 100.0).min(100.0))
}

/// Confidence grade for the current calibration state.
///
/// Rows are checked strictest-first within the Normal phase; spread is the
/// normalized buffer range (0..=1) and uptime counts decay intervals.
pub fn confidence(phase: CalibrationPhase, spread: f32, uptime_intervals: u32) -> Confidence {
    match phase {
        CalibrationPhase::Init => Confidence::Unreliable,
        CalibrationPhase::BurnIn => Confidence::Low,
        CalibrationPhase::Normal => {
            if spread < SPREAD_VERY_HIGH_MAX && uptime_intervals >= UPTIME_VERY_HIGH_INTERVALS {
                Confidence::VeryHigh
            } else if spread < SPREAD_HIGH_MAX && uptime_intervals >= UPTIME_HIGH_INTERVALS {
                Confidence::High
            } else if spread < SPREAD_MODERATE_MAX {
                Confidence::Moderate
            } else {
                Confidence::Low
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_at_ceiling_is_exactly_100() {
        // r = c hits 100 before the clamp even engages
        assert_eq!(quality_score(150_000.0, 150_000.0), Some(100.0));
    }

    #[test]
    fn score_clamps_above_ceiling() {
        assert_eq!(quality_score(300_000.0, 150_000.0), Some(100.0));
    }

    #[test]
    fn score_falls_off_quadratically() {
        // Half the ceiling scores a quarter of the scale
        assert_eq!(quality_score(75_000.0, 150_000.0), Some(25.0));
    }

    #[test]
    fn score_bounded_for_any_inputs() {
        for r in [0.0, 1.0, 80_000.0, 150_000.0, 1.0e9] {
            for c in [1.0, 90_000.0, 150_000.0] {
                let score = quality_score(r, c).unwrap();
                assert!((0.0..=100.0).contains(&score));
            }
        }
    }

    #[test]
    fn unseeded_ceiling_yields_no_score() {
        assert_eq!(quality_score(120_000.0, 0.0), None);
        assert_eq!(quality_score(120_000.0, -1.0), None);
    }

    #[test]
    fn early_phases_pin_the_grade() {
        // Phase dominates: even a perfect spread grades 0/1 before Normal
        assert_eq!(confidence(CalibrationPhase::Init, 0.0, 1_000), Confidence::Unreliable);
        assert_eq!(confidence(CalibrationPhase::BurnIn, 0.0, 1_000), Confidence::Low);
    }

    #[test]
    fn normal_phase_grades_by_spread_and_uptime() {
        use CalibrationPhase::Normal;

        // Wide spread: low regardless of uptime
        assert_eq!(confidence(Normal, 0.10, 500), Confidence::Low);

        // Moderate needs only the spread
        assert_eq!(confidence(Normal, 0.05, 0), Confidence::Moderate);

        // High needs tight spread and a little uptime
        assert_eq!(confidence(Normal, 0.03, 0), Confidence::Moderate);
        assert_eq!(confidence(Normal, 0.03, 2), Confidence::High);

        // Very high needs the tightest spread and long uptime
        assert_eq!(confidence(Normal, 0.01, 99), Confidence::High);
        assert_eq!(confidence(Normal, 0.01, 100), Confidence::VeryHigh);
    }

    #[test]
    fn thresholds_are_strict_inequalities() {
        use CalibrationPhase::Normal;

        assert_eq!(confidence(Normal, 0.075, 0), Confidence::Low);
        assert_eq!(confidence(Normal, 0.035, 10), Confidence::Moderate);
        assert_eq!(confidence(Normal, 0.020, 200), Confidence::High);
    }
}
