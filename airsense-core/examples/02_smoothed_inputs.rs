//! Range Smoothing Demonstration
//!
//! Indoor sensors sit in air that HVAC equipment stirs on a cycle: an air
//! conditioner kicking in swings temperature and humidity, and through
//! them the gas reading, every few minutes. This example shows the
//! Donchian midpoint smoother soaking up that oscillation, and the range
//! cap auto-narrowing the window when a genuine step change arrives.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_smoothed_inputs
//! ```

use airsense_core::{
    smoothing::RangeTracker,
    time::{FixedTime, TimeSource},
    EngineConfig, IaqEngine, SensorSample, SmoothingConfig,
};

fn main() {
    println!("AirSense Smoothing Example");
    println!("==========================\n");

    // Part 1: the tracker in isolation.
    // An oscillating trace (AC compressor cycling) around 22°C.
    println!("Oscillating temperature, window of 8:\n");
    println!("sample   raw     min     max     midpoint");
    println!("------  ------  ------  ------  --------");

    let mut tracker = RangeTracker::<8>::new(8);
    let trace = [
        22.0, 23.5, 21.0, 23.4, 21.1, 23.6, 20.9, 23.5,
        21.0, 23.4, 21.2, 23.5,
    ];

    for (i, &t) in trace.iter().enumerate() {
        let stats = tracker.track(t);
        println!(
            "{:6}  {:6.1}  {:6.1}  {:6.1}  {:8.2}",
            i, t, stats.min, stats.max, stats.average
        );
    }

    println!("\nThe midpoint parks between the oscillation extremes with no lag.\n");

    // Part 2: a step change against a range cap.
    // A window opening drops the temperature 5°C in one sample; the cap
    // shortens the effective lookback so the midpoint snaps to the new
    // regime instead of averaging across it.
    println!("Step change with a 1.5°C range cap:\n");
    println!("sample   raw     min     max     midpoint");
    println!("------  ------  ------  ------  --------");

    let mut capped = RangeTracker::<8>::new(8).with_range_cap(1.5);
    let step = [22.0, 22.1, 21.9, 22.0, 17.0, 17.1, 16.9, 17.0];

    for (i, &t) in step.iter().enumerate() {
        let stats = capped.track(t);
        println!(
            "{:6}  {:6.1}  {:6.1}  {:6.1}  {:8.2}",
            i, t, stats.min, stats.max, stats.average
        );
    }

    // Part 3: the engine with per-channel smoothing enabled.
    println!("\nEngine with smoothing on all three channels:\n");

    let mut config = EngineConfig::default();
    config.set_phase_durations(5_000, 10_000, 120_000);
    config
        .enable_smoothing(SmoothingConfig {
            window: 8,
            temperature_cap: Some(2.0),
            humidity_cap: Some(5.0),
            gas_cap: Some(15_000.0),
        })
        .expect("smoothing settings are valid");

    let mut engine = IaqEngine::new(config);
    let mut clock = FixedTime::new(0);

    for cycle in 0..160u64 {
        // Noisy but settling resistance plus oscillating temperature
        let wobble = if cycle % 2 == 0 { -4_000.0 } else { 4_000.0 };
        let gas = (90_000.0 + cycle as f32 * 400.0 + wobble).min(150_000.0);

        let reading = engine.process(
            SensorSample {
                temperature_c: 22.0 + if cycle % 2 == 0 { -1.2 } else { 1.2 },
                humidity_pct: 45.0,
                gas_resistance_ohms: gas,
            },
            clock.now(),
        );

        if cycle % 40 == 39 {
            println!(
                "  cycle {:3}: phase {:?}, grade {}, IAQ {:.1}",
                cycle,
                reading.phase,
                reading.confidence.grade(),
                reading.iaq
            );
        }

        clock.advance(1_000);
    }

    println!("\nKey Insights:");
    println!("- The Donchian midpoint removes oscillation without phase lag");
    println!("- The range cap turns a step change into a short re-lock, not a smear");
    println!("- Each input channel gets its own independent tracker");
}
