// Trigger synchronization walkthrough
//
// Shows how the start of the sweep follows the trigger level while the level
// is reachable, and how the trace free-runs once it is not.

use pocketscope_rs::{InputCoupling, Oscilloscope, SignalGenerator, TriggerSlope};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    println!("PocketScope Trigger Sweep Example");
    println!("=================================\n");

    let mut scope = Oscilloscope::default();
    scope.channel_mut(0).input_coupling = InputCoupling::Ac;

    let generator = SignalGenerator {
        amplitude: 2.0,
        ..SignalGenerator::default()
    };
    let mut rng = StdRng::from_entropy();

    // 2V at 1V/div spans 50 screen units either side of center (128).
    println!("1. Reachable trigger levels (rising slope)");
    for level in [90, 110, 128, 150, 170] {
        scope.trigger.level = level;
        generator.generate(&mut scope, 0, &mut rng);
        println!(
            "   level {:3} -> sweep starts at {:3}",
            level,
            scope.channel(0).samples[0]
        );
    }

    println!("\n2. Falling slope");
    scope.trigger.slope = TriggerSlope::Falling;
    scope.trigger.level = 110;
    generator.generate(&mut scope, 0, &mut rng);
    println!(
        "   level 110 -> sweep starts at {:3}",
        scope.channel(0).samples[0]
    );

    println!("\n3. Unreachable level, display free-runs");
    scope.trigger.slope = TriggerSlope::Rising;
    scope.trigger.level = 250;
    for pass in 1..=3 {
        generator.generate(&mut scope, 0, &mut rng);
        println!(
            "   pass {} -> sweep starts at {:3}",
            pass,
            scope.channel(0).samples[0]
        );
    }

    println!("\nTrigger sweep demo completed!");
}
