//! Clean-air ceiling estimation buffer
//!
//! The buffer holds the highest recently observed compensated gas
//! resistances. Its mean is the **ceiling** - the engine's running estimate
//! of what this particular sensor reads in clean air - and the normalized
//! width of its contents (the **spread**) measures how settled that
//! estimate is.
//!
//! Two insertion policies cover the two calibration regimes:
//!
//! - *Rotation* simply evicts the oldest slot. Used while the buffer fills
//!   and for the periodic decay folds that stop the ceiling from going
//!   stale in a static environment.
//! - *Replace-smallest* overwrites the current minimum, and only with a
//!   larger value. Used during burn-in (and optionally afterwards) to
//!   curate a high-water-mark set out of noisy early data: good readings
//!   displace poor ones, poor readings bounce off.

use crate::buffer::RingBuffer;
use crate::constants::calibration::CALIBRATION_SLOTS;

/// Bounded multiset of the highest recent compensated resistances.
#[derive(Debug, Clone, Default)]
pub struct CalibrationBuffer {
    samples: RingBuffer<CALIBRATION_SLOTS>,
    ceiling: f32,
}

impl CalibrationBuffer {
    /// Creates an empty buffer with a zero ceiling.
    pub const fn new() -> Self {
        Self {
            samples: RingBuffer::new(),
            ceiling: 0.0,
        }
    }

    /// Folds a compensated reading into the buffer.
    ///
    /// With `replace_smallest` unset, or while any slot is still
    /// unpopulated, the value is appended with wraparound (pure rotation).
    /// On a fully populated buffer with `replace_smallest` set, the value
    /// overwrites the current minimum slot only if it exceeds it and is
    /// discarded otherwise.
    ///
    /// Callers never pass a non-positive value; compensation cannot produce
    /// one from a positive reading and glitch filtering happens upstream.
    pub fn update(&mut self, value: f32, replace_smallest: bool) {
        debug_assert!(value > 0.0, "calibration values are strictly positive");

        if replace_smallest && self.samples.is_full() {
            if !self.samples.replace_min(value) {
                // Discarded: nothing changed, the ceiling stands.
                return;
            }
        } else {
            self.samples.push(value);
        }

        // Recompute the mean over exactly the populated slots, so a value
        // is never counted twice.
        let count = self.samples.len();
        if count > 0 {
            let sum: f32 = self.samples.iter().sum();
            self.ceiling = sum / count as f32;
        }
    }

    /// Running mean of the populated slots; 0.0 until the first update.
    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }

    /// Normalized min/max range `(max - min) / max` of the populated
    /// slots. Defined as 1.0 (worst) while the buffer holds no data.
    pub fn spread(&self) -> f32 {
        match (self.samples.min(), self.samples.max()) {
            (Some(min), Some(max)) if max > 0.0 => (max - min) / max,
            _ => 1.0,
        }
    }

    /// True once every slot has been populated.
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True before the first update.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Empties the buffer and zeroes the ceiling (engine reset).
    pub fn clear(&mut self) {
        self.samples.clear();
        self.ceiling = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: impl IntoIterator<Item = f32>) -> CalibrationBuffer {
        let mut buf = CalibrationBuffer::new();
        for v in values {
            buf.update(v, false);
        }
        buf
    }

    #[test]
    fn empty_buffer_reports_worst_case() {
        let buf = CalibrationBuffer::new();
        assert_eq!(buf.ceiling(), 0.0);
        assert_eq!(buf.spread(), 1.0);
        assert!(buf.is_empty());
    }

    #[test]
    fn ceiling_is_arithmetic_mean() {
        let buf = filled([100_000.0, 120_000.0, 140_000.0]);
        assert_eq!(buf.ceiling(), 120_000.0);
    }

    #[test]
    fn spread_is_normalized_range() {
        let buf = filled([90_000.0, 100_000.0]);
        assert!((buf.spread() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn rotation_evicts_oldest_at_capacity() {
        // Small integer-valued samples keep every f32 sum exact
        let mut buf = CalibrationBuffer::new();
        for i in 0..CALIBRATION_SLOTS {
            buf.update(1_000.0 + i as f32, false);
        }
        assert!(buf.is_full());

        // One more rotation displaces the oldest (1_000.0)
        buf.update(2_500.0, false);
        let expected: f32 = ((0..CALIBRATION_SLOTS)
            .map(|i| 1_000.0 + i as f32)
            .sum::<f32>()
            - 1_000.0
            + 2_500.0)
            / CALIBRATION_SLOTS as f32;
        assert_eq!(buf.ceiling(), expected);
    }

    #[test]
    fn replace_smallest_rejects_lower_values() {
        let mut buf = CalibrationBuffer::new();
        for _ in 0..CALIBRATION_SLOTS {
            buf.update(150_000.0, false);
        }

        let before = buf.ceiling();
        buf.update(100_000.0, true);

        // Idempotent no-op: smaller than the minimum
        assert_eq!(buf.ceiling(), before);
        assert_eq!(buf.spread(), 0.0);
    }

    #[test]
    fn replace_smallest_ratchets_upward() {
        let mut buf = CalibrationBuffer::new();
        for _ in 0..CALIBRATION_SLOTS {
            buf.update(100_000.0, false);
        }

        buf.update(160_000.0, true);
        assert!(buf.ceiling() > 100_000.0);

        // The displaced slot was the minimum, so the minimum never drops
        assert_eq!(buf.spread(), (160_000.0 - 100_000.0) / 160_000.0);
    }

    #[test]
    fn replace_smallest_appends_while_filling() {
        let mut buf = CalibrationBuffer::new();

        // Not yet full: the policy degrades to rotation
        buf.update(50_000.0, true);
        buf.update(40_000.0, true);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.ceiling(), 45_000.0);
    }

    #[test]
    fn clear_returns_to_pristine_state() {
        let mut buf = filled([100_000.0, 120_000.0]);
        buf.clear();

        assert_eq!(buf.ceiling(), 0.0);
        assert_eq!(buf.spread(), 1.0);
        assert!(buf.is_empty());
    }
}
