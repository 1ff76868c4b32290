//! Phase timing defaults and floors
//!
//! All phase timings are calibrated against a polling cadence of roughly
//! one cycle per second. A caller polling much slower should scale these up
//! proportionally; the engine does not enforce the cadence.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1_000;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

/// Default minimum Init phase duration (30 s).
///
/// Resistance readings in the first half minute after power-on are
/// dominated by heater warm-up and are not usable even for trend tracking.
pub const DEFAULT_INIT_MS: u64 = 30 * MS_PER_SECOND;

/// Default minimum Burn-In phase duration (5 min).
pub const DEFAULT_BURNIN_MS: u64 = 5 * MS_PER_MINUTE;

/// Default ceiling decay interval in Normal phase (30 min).
///
/// Upper bound on how stale the ceiling may become in a static
/// environment before a reading is force-rotated into the buffer.
pub const DEFAULT_DECAY_MS: u64 = 30 * MS_PER_MINUTE;

/// Burn-In must outlast Init by at least this much (ms).
pub const BURNIN_LEAD_MS: u64 = MS_PER_SECOND;

/// The decay interval must outlast Burn-In by at least this much (ms).
pub const DECAY_LEAD_MS: u64 = MS_PER_MINUTE;
