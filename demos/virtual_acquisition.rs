// Virtual acquisition loop
//
// Drives the signal generator the way the demo service does: one generation
// pass plus noise per channel per 200ms tick, then a measurement summary.

use clap::Parser;
use pocketscope_rs::{
    add_noise, measure, Oscilloscope, SignalGenerator, SignalType, SignalUnit,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::thread;
use std::time::Duration;

#[derive(Parser)]
#[command(about = "Run the virtual acquisition engine without a device")]
struct Args {
    /// Signal frequency in Hz
    #[arg(long, default_value_t = 100.0)]
    frequency: f64,

    /// Signal amplitude in volts
    #[arg(long, default_value_t = 5.0)]
    amplitude: f64,

    /// DC offset in volts
    #[arg(long, default_value_t = 5.0)]
    offset: f64,

    /// Number of acquisition ticks to run
    #[arg(long, default_value_t = 5)]
    ticks: u32,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    println!("PocketScope Virtual Acquisition Example");
    println!("=======================================\n");

    let mut scope = Oscilloscope::default();
    let generator = SignalGenerator {
        signal_type: SignalType::Sine,
        frequency: args.frequency,
        amplitude: args.amplitude,
        offset: args.offset,
    };
    let mut rng = StdRng::from_entropy();

    println!(
        "Generating a {}Hz sine at {} / {}\n",
        args.frequency,
        scope.channel(0).volts_per_division,
        scope.time_base
    );

    for tick in 1..=args.ticks {
        for channel_index in 0..Oscilloscope::CHANNEL_COUNT {
            generator.generate(&mut scope, channel_index, &mut rng);
            add_noise(&mut scope.channel_mut(channel_index).samples, &mut rng);
        }

        println!("Tick {}:", tick);
        for channel_index in 0..Oscilloscope::CHANNEL_COUNT {
            print_channel_summary(&scope, channel_index);
        }

        thread::sleep(Duration::from_millis(200));
    }

    println!("\nAcquisition demo completed!");
}

// Helper function printing the readouts shown next to each channel
fn print_channel_summary(scope: &Oscilloscope, channel_index: usize) {
    let channel = scope.channel(channel_index);
    println!(
        "   CH{}: {} samples, Vdc {:.2}V, Vrms {:.2}V, Vptp {:.2}V",
        channel_index + 1,
        channel.samples.len(),
        measure(channel, SignalUnit::Vdc),
        measure(channel, SignalUnit::Vrms),
        measure(channel, SignalUnit::Vptp),
    );
}
