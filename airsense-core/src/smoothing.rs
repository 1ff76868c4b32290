//! Sliding min/max range smoothing for noisy inputs
//!
//! HVAC equipment makes indoor sensor traces oscillate: an air conditioner
//! cycling on and off swings temperature, humidity, and (through both) gas
//! resistance every few minutes. A moving arithmetic mean flattens the
//! oscillation but lags the signal; the midpoint of the min/max range over
//! a short lookback window (a Donchian channel midpoint, borrowed from
//! trading) removes the oscillation with no phase lag at all.
//!
//! The tracker adds one twist over the plain channel: an optional range
//! cap. When a genuine regime shift blows the observed range past the cap,
//! the backward walk stops early and the violated side is clamped, which
//! effectively shortens the lookback until the window catches up with the
//! new regime. A step change therefore converges in a couple of samples
//! instead of dragging a stale extreme along for a full window length.
//!
//! One tracker instance per input channel; the engine owns up to three.

use crate::buffer::RingBuffer;
use crate::constants::calibration::MIN_SMOOTHING_WINDOW;

/// Statistics over the current lookback window, updated on every sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeStats {
    /// The sample just written
    pub current: f32,

    /// Window minimum (possibly raised by the range cap)
    pub min: f32,

    /// Window maximum (possibly lowered by the range cap)
    pub max: f32,

    /// Donchian midpoint `(min + max) / 2` - the smoothed output
    pub average: f32,
}

/// Min/max range tracker over a bounded sample window.
///
/// Capacity `N` fixes the memory footprint; the effective lookback is the
/// runtime `window`, clamped to `[2, N]` so a configured length can never
/// outgrow the storage.
#[derive(Debug, Clone)]
pub struct RangeTracker<const N: usize> {
    samples: RingBuffer<N>,
    window: usize,
    range_cap: Option<f32>,
    stats: Option<RangeStats>,
}

impl<const N: usize> RangeTracker<N> {
    /// Creates a tracker with the given lookback window, clamped to
    /// `[MIN_SMOOTHING_WINDOW, N]`.
    pub fn new(window: usize) -> Self {
        Self {
            samples: RingBuffer::new(),
            window: window.clamp(MIN_SMOOTHING_WINDOW, N),
            range_cap: None,
            stats: None,
        }
    }

    /// Caps the reported range at `cap`. Non-positive or non-finite caps
    /// are ignored; validation happens at the configuration layer.
    pub fn with_range_cap(mut self, cap: f32) -> Self {
        if cap.is_finite() && cap > 0.0 {
            self.range_cap = Some(cap);
        }
        self
    }

    /// Effective lookback window length.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Statistics from the most recent [`track`](Self::track) call.
    pub fn stats(&self) -> Option<RangeStats> {
        self.stats
    }

    /// Records a sample and recomputes the window statistics.
    ///
    /// Walks backward from the just-written sample across up to
    /// `min(window, samples_seen)` slots, growing the running min/max. The
    /// newest sample anchors the window, so `min <= current <= max` holds
    /// even when the cap truncates the walk.
    pub fn track(&mut self, sample: f32) -> RangeStats {
        self.samples.push(sample);

        let mut min = sample;
        let mut max = sample;

        let span = self.window.min(self.samples.len());
        for value in self.samples.recent().take(span).skip(1) {
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }

            if let Some(cap) = self.range_cap {
                if max - min > cap {
                    // Regime shift: stop the walk and clamp the stale side.
                    if max - sample < sample - min {
                        min = max - cap;
                    } else {
                        max = min + cap;
                    }
                    break;
                }
            }
        }

        let stats = RangeStats {
            current: sample,
            min,
            max,
            average: (min + max) / 2.0,
        };
        self.stats = Some(stats);
        stats
    }
}
