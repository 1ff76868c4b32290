//! Cold Start Walkthrough
//!
//! Simulates a sensor powering on in clean air and follows the engine
//! through its whole lifecycle: the post-power-on resistance plunge, the
//! stabilization check that ends Init, the burn-in accumulation of the
//! clean-air ceiling, and finally live scoring in Normal phase.
//!
//! ## What You'll Learn
//!
//! - Driving the engine from a caller-owned polling loop and clock
//! - How the phase machine reacts to the settling resistance curve
//! - Why the score stays neutral (50) until a ceiling exists
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_cold_start
//! ```

use airsense_core::{
    time::{FixedTime, TimeSource},
    CalibrationPhase, EngineConfig, IaqEngine, SensorSample,
};

/// Synthetic settling curve: a sharp plunge for the first half minute,
/// then a slow climb toward the sensor's clean-air plateau.
fn settling_resistance(cycle: u64) -> f32 {
    match cycle {
        0..=29 => 160_000.0 - cycle as f32 * 2_500.0,
        _ => (85_000.0 + (cycle - 30) as f32 * 450.0).min(150_000.0),
    }
}

fn main() {
    println!("AirSense Cold Start Example");
    println!("===========================\n");

    // Fast schedule so the whole lifecycle fits in a short simulation:
    // init 10 s, burn-in 30 s (raised by the setter if under-range),
    // decay 2 min.
    let mut config = EngineConfig::default();
    config.set_phase_durations(10_000, 30_000, 120_000);

    let mut engine = IaqEngine::new(config);
    let mut clock = FixedTime::new(0);
    let mut last_phase = CalibrationPhase::Init;

    println!("cycle  resistance    phase    grade  accuracy  IAQ");
    println!("-----  ----------  --------   -----  --------  -----");

    for cycle in 0..240u64 {
        let sample = SensorSample {
            temperature_c: 25.0,
            humidity_pct: 40.0,
            gas_resistance_ohms: settling_resistance(cycle),
        };

        let reading = engine.process(sample, clock.now());

        if reading.phase != last_phase {
            println!("       >>> phase change: {:?} -> {:?}", last_phase, reading.phase);
            last_phase = reading.phase;
        }

        if cycle % 20 == 0 {
            println!(
                "{:5}  {:9.0}Ω  {:8?}   {:5}  {:7.1}%  {:5.1}",
                cycle,
                sample.gas_resistance_ohms,
                reading.phase,
                reading.confidence.grade(),
                reading.accuracy_pct,
                reading.iaq,
            );
        }

        clock.advance(1_000); // 1 Hz cadence
    }

    println!("\nFinal state:");
    println!("  Phase:      {:?}", engine.phase());
    println!("  Ceiling:    {:.0}Ω (humidity-compensated)", engine.ceiling());
    println!("  Confidence: {:?}", engine.confidence());
    println!("  IAQ:        {:.1}", engine.iaq());

    println!("\nKey Insights:");
    println!("- The score holds at a neutral 50 until burn-in seeds the ceiling");
    println!("- Init ends when resistance posts three consecutive higher lows");
    println!("- Confidence only rises as the calibration buffer converges");
}
