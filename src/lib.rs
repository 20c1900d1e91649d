//! # PocketScope RS
//!
//! A Rust library implementing the virtual acquisition engine of a handheld
//! two-channel oscilloscope front end.
//!
//! In the absence of (or in addition to) a real digitizer, the engine
//! synthesizes 8-bit sample sweeps that behave like a real scope's triggered
//! acquisition: input coupling, volts/division and time/division scaling and
//! trigger level/slope synchronization all apply. Rendering, gestures and the
//! physical-device protocol live elsewhere and only read the device model and
//! sample buffers defined here.
//!
//! ## Features
//!
//! - **Device model**: two channels with coupling, vertical scale, probe
//!   attenuation and trace position, plus global trigger and timebase state
//! - **Triggered synthesis**: sine, square and triangle sweeps phase-aligned
//!   to the trigger level and slope, free-running when the level is
//!   unreachable
//! - **Digitizer behavior**: every sample saturates into the [0,255] display
//!   range; bounded quantization noise can be layered on top
//! - **Deterministic testing**: the pseudo-random generator is injected, so
//!   phase and noise draws can be seeded
//! - **Measurements**: Vdc, Vrms, min/max and peak-to-peak readouts computed
//!   back in volts from an acquired sweep
//!
//! ## Examples
//!
//! ### One acquisition tick
//!
//! ```rust
//! use pocketscope_rs::{add_noise, Oscilloscope, SignalGenerator};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut scope = Oscilloscope::default();
//! let generator = SignalGenerator::default();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! for channel_index in 0..Oscilloscope::CHANNEL_COUNT {
//!     generator.generate(&mut scope, channel_index, &mut rng);
//!     add_noise(&mut scope.channel_mut(channel_index).samples, &mut rng);
//! }
//!
//! let trace = scope.channel(0).samples.as_slice();
//! assert_eq!(trace.len(), 750);
//! ```
//!
//! ### Trigger synchronization
//!
//! ```rust
//! use pocketscope_rs::{InputCoupling, Oscilloscope, SignalGenerator, TriggerSlope};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut scope = Oscilloscope::default();
//! scope.channel_mut(0).input_coupling = InputCoupling::Ac;
//! scope.trigger.level = 100;
//! scope.trigger.slope = TriggerSlope::Rising;
//!
//! let generator = SignalGenerator {
//!     amplitude: 2.0,
//!     ..SignalGenerator::default()
//! };
//! generator.generate(&mut scope, 0, &mut StdRng::seed_from_u64(7));
//!
//! // The sweep starts right at the trigger level.
//! assert_eq!(scope.channel(0).samples[0], 100);
//! ```
//!
//! ### Measurements
//!
//! ```rust
//! use pocketscope_rs::{measure, Oscilloscope, SignalGenerator, SignalUnit};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut scope = Oscilloscope::default();
//! SignalGenerator::default().generate(&mut scope, 0, &mut StdRng::seed_from_u64(7));
//!
//! let vptp = measure(scope.channel(0), SignalUnit::Vptp);
//! assert!(vptp > 0.0);
//! ```

pub mod measurements;
pub mod message_writer;
pub mod scope_model;
pub mod signal_generator;
pub mod units;

// Re-export the main types for convenience
pub use scope_model::{
    Attenuation, Channel, DeviceContext, InputCoupling, Oscilloscope, SampleBuffer, Trigger,
    TriggerMode, TriggerSlope,
};

pub use signal_generator::{add_noise, SignalGenerator, SignalType};

pub use units::{TimeBase, VoltsPerDivision};

pub use measurements::{measure, SignalUnit};

pub use message_writer::{
    Message, MessageSerializer, MessageWriter, MessageWriterError, RawFrameSerializer,
};
