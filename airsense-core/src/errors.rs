//! Error types for engine configuration
//!
//! The engine itself has no fatal conditions: malformed samples degrade to
//! "hold the last known good output" (see the engine module), sensor
//! glitches are expected and handled, and nothing internal can panic. The
//! only errors that surface to callers come from the configuration setters,
//! which reject invalid values synchronously and leave prior state intact.
//!
//! Kept in the same shape as the rest of the embedded-friendly API:
//! - `Copy`, with inline scalar context only - no heap, no `String`
//! - small enough to return from setters without move gymnastics

use thiserror_no_std::Error;

/// Result type for configuration setters.
pub type ConfigResult = Result<(), ConfigError>;

/// Rejected configuration values - kept small for embedded use.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Resistance limits outside the supported envelope, or min above max.
    #[error("resistance limits [{min}, {max}] ohms invalid")]
    ResistanceLimitsInvalid {
        /// Requested lower bound (Ω)
        min: u32,
        /// Requested upper bound (Ω)
        max: u32,
    },

    /// Humidity compensation slope not finite or outside (0, 1].
    #[error("humidity slope {slope} outside (0, 1]")]
    SlopeOutOfRange {
        /// Requested slope value
        slope: f32,
    },

    /// Smoothing window shorter than 2 samples or beyond tracker capacity.
    #[error("smoothing window {window} outside [{min}, {max}]")]
    WindowOutOfRange {
        /// Requested window length
        window: usize,
        /// Shortest accepted window
        min: usize,
        /// Longest accepted window (tracker capacity)
        max: usize,
    },

    /// Range cap must be a positive, finite number when present.
    #[error("range cap {cap} must be positive and finite")]
    RangeCapInvalid {
        /// Requested cap value
        cap: f32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ResistanceLimitsInvalid { min, max } =>
                defmt::write!(fmt, "resistance limits [{}, {}] invalid", min, max),
            Self::SlopeOutOfRange { slope } =>
                defmt::write!(fmt, "slope {} outside (0, 1]", slope),
            Self::WindowOutOfRange { window, min, max } =>
                defmt::write!(fmt, "window {} outside [{}, {}]", window, min, max),
            Self::RangeCapInvalid { cap } =>
                defmt::write!(fmt, "range cap {} invalid", cap),
        }
    }
}
