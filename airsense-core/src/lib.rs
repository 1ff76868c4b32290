//! Adaptive IAQ calibration engine for AirSense
//!
//! Turns raw metal-oxide gas-resistance readings into a relative indoor air
//! quality score. Raw resistance drifts over minutes to days (thermal
//! burn-in, humidity cross-sensitivity, environmental drift), so the engine
//! continuously re-learns a "clean air" resistance ceiling and normalizes
//! each reading against it.
//!
//! Key constraints:
//! - Runs on 32KB RAM (ESP32)
//! - No heap allocation after construction
//! - One synchronous, run-to-completion update per polling cycle
//!
//! ```no_run
//! use airsense_core::{IaqEngine, EngineConfig, SensorSample};
//!
//! let mut engine = IaqEngine::new(EngineConfig::default());
//!
//! // One sample per polling cycle, timestamp in milliseconds
//! let reading = engine.process(SensorSample {
//!     temperature_c: 25.0,
//!     humidity_pct: 40.0,
//!     gas_resistance_ohms: 120_000.0,
//! }, 1_000);
//!
//! println!("IAQ {} (confidence {:?})", reading.iaq, reading.confidence);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod calibration;
pub mod compensation;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod score;
pub mod smoothing;
pub mod time;

// Public API
pub use calibration::CalibrationPhase;
pub use config::{CeilingPolicy, EngineConfig, SmoothingConfig};
pub use engine::{IaqEngine, IaqReading, SensorSample};
pub use errors::{ConfigError, ConfigResult};
pub use score::Confidence;

/// Crate version string, straight from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Optional logging - compiles to nothing when the `log` feature is off
// so no_std builds stay silent.
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {{}};
}

pub(crate) use log_debug;
pub(crate) use log_info;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
