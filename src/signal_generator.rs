//! Virtual acquisition core: triggered, coupling-aware waveform synthesis.
//!
//! One generation pass fills a single channel's sample buffer with a scaled
//! sampling of the configured waveform, phase-aligned so the trace crosses the
//! trigger level at the start of the sweep whenever the level is reachable.
//! The pass reads the device model, writes only the target buffer and keeps no
//! state of its own; the phase is recomputed from trigger geometry on every
//! call, mirroring a trigger event once per sweep.

use crate::scope_model::{InputCoupling, Oscilloscope, SampleBuffer, TriggerSlope};
use crate::units::PIXELS_PER_DIVISION;
use rand::Rng;
use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, PI, TAU};

/// Waveform shape produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalType {
    Sine,
    Square,
    Triangle,
}

impl SignalType {
    /// Normalized instantaneous value at phase angle `theta`, in [-1, 1].
    fn instantaneous_value(self, theta: f64) -> f64 {
        match self {
            SignalType::Sine => theta.sin(),
            SignalType::Square => {
                if theta.sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            SignalType::Triangle => FRAC_2_PI * theta.sin().asin(),
        }
    }

    /// Phase angle at which the waveform passes through normalized value `x`
    /// with the requested crossing direction.
    fn crossing_phase(self, x: f64, slope: TriggerSlope) -> f64 {
        match (self, slope) {
            (SignalType::Sine, TriggerSlope::Rising) => x.asin(),
            (SignalType::Sine, TriggerSlope::Falling) => PI - x.asin(),
            (SignalType::Triangle, TriggerSlope::Rising) => FRAC_PI_2 * x,
            (SignalType::Triangle, TriggerSlope::Falling) => PI - FRAC_PI_2 * x,
            // A square wave only crosses intermediate levels at its jumps.
            (SignalType::Square, TriggerSlope::Rising) => 0.0,
            (SignalType::Square, TriggerSlope::Falling) => PI,
        }
    }
}

/// Signal parameters for the virtual input stage.
///
/// One generator may drive both channels sequentially; it carries no state
/// between calls.
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    pub signal_type: SignalType,
    /// Signal frequency in Hz. Must be positive.
    pub frequency: f64,
    /// Signal amplitude in volts. Must be non-negative.
    pub amplitude: f64,
    /// DC offset in volts, visible only under DC coupling.
    pub offset: f64,
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self {
            signal_type: SignalType::Sine,
            frequency: 100.0,
            amplitude: 5.0,
            offset: 5.0,
        }
    }
}

impl SignalGenerator {
    /// Run one generation pass, overwriting the sample buffer of
    /// `channel_index` with a triggered sweep.
    ///
    /// The trigger level and slope come from the device model; the pass leaves
    /// every other channel untouched. Out-of-range voltages saturate at the
    /// digitizer extremes rather than wrapping.
    ///
    /// # Panics
    ///
    /// Panics if `channel_index` is out of range, if the channel's buffer is
    /// empty, or if the generator parameters violate their invariants
    /// (`frequency > 0`, `amplitude >= 0`). All of these are caller contract
    /// breaches.
    pub fn generate<R: Rng>(
        &self,
        scope: &mut Oscilloscope,
        channel_index: usize,
        rng: &mut R,
    ) {
        assert!(self.frequency > 0.0, "signal frequency must be positive");
        assert!(self.amplitude >= 0.0, "signal amplitude must be non-negative");

        let trigger_level = f64::from(scope.trigger.level);
        let slope = scope.trigger.slope;
        let time_base = scope.time_base;
        let channel = scope.channel_mut(channel_index);
        assert!(!channel.samples.is_empty(), "sample buffer must be non-empty");

        let (gnd, input) = coupling_gains(channel.input_coupling);
        let samples_per_volt = PIXELS_PER_DIVISION / channel.volts_per_division.to_volts();

        // Screen-unit amplitude, and offset gated by the coupling mode.
        let a = self.amplitude * samples_per_volt;
        let o = input * self.offset * samples_per_volt;
        let y_position = f64::from(channel.y_position);

        let seconds_per_sample =
            time_base.to_seconds() / f64::from(time_base.samples_per_division());

        let phase = align_phase(
            self.signal_type,
            slope,
            gnd,
            a,
            o,
            y_position,
            trigger_level,
            rng,
        );
        log::debug!(
            "channel {} pass: amplitude {:.1}px, offset {:.1}px, phase {:.3}rad",
            channel_index,
            a,
            o,
            phase
        );

        let omega = TAU * self.frequency;
        for i in 0..channel.samples.len() {
            let t = i as f64 * seconds_per_sample;
            let theta = omega * t + phase;
            let value = y_position - gnd * (o + a * self.signal_type.instantaneous_value(theta));
            channel.samples[i] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Ground and input gains for a coupling mode.
///
/// AC keeps the ground reference but strips the DC offset, DC passes the full
/// signal, GND pins the trace to the reference line.
fn coupling_gains(coupling: InputCoupling) -> (f64, f64) {
    match coupling {
        InputCoupling::Ac => (1.0, 0.0),
        InputCoupling::Dc => (1.0, 1.0),
        InputCoupling::Gnd => (0.0, 0.0),
    }
}

/// Resolve the sweep phase from the trigger geometry.
///
/// Flat or grounded traces have no trigger point and run at phase zero. An
/// unreachable trigger level leaves the display free-running on a fresh random
/// phase each sweep. Otherwise the phase places the requested crossing of the
/// trigger level exactly at sample zero.
fn align_phase<R: Rng>(
    signal_type: SignalType,
    slope: TriggerSlope,
    gnd: f64,
    a: f64,
    o: f64,
    y_position: f64,
    trigger_level: f64,
    rng: &mut R,
) -> f64 {
    if a < 1.0 || gnd < 1.0 {
        // Amplitude below one screen unit, or grounded input.
        return 0.0;
    }
    if trigger_level < y_position - (o + a) || trigger_level > y_position + (o + a) {
        log::debug!("trigger level {} unreachable, free-running", trigger_level);
        return rng.gen_range(0.0..TAU);
    }

    // Normalized level in waveform space. The clamp covers levels inside the
    // coarse reachability window above but beyond the waveform's actual span.
    let x = ((y_position - o) - trigger_level) / a;
    signal_type.crossing_phase(x.clamp(-1.0, 1.0), slope)
}

/// Add bounded quantization noise to an already generated sweep.
///
/// Every sample gets an independent uniform offset in [-2, +1] counts; the
/// result is clamped back into the digitizer range.
pub fn add_noise<R: Rng>(buffer: &mut SampleBuffer, rng: &mut R) {
    const NOISE_LEVEL: i16 = 2;

    for i in 0..buffer.len() {
        let jittered = i16::from(buffer[i]) + rng.gen_range(-NOISE_LEVEL..NOISE_LEVEL);
        buffer[i] = jittered.clamp(0, 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::VoltsPerDivision;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_grounded_trace_is_flat_at_center() {
        let mut scope = Oscilloscope::default();
        scope.channel_mut(0).input_coupling = InputCoupling::Gnd;
        scope.trigger.level = 17;

        let generator = SignalGenerator {
            frequency: 1234.0,
            amplitude: 3.3,
            offset: 1.2,
            ..SignalGenerator::default()
        };
        generator.generate(&mut scope, 0, &mut seeded_rng());

        assert!(scope.channel(0).samples.iter().all(|&s| s == 128));
    }

    #[test]
    fn test_zero_amplitude_shows_only_offset() {
        let mut scope = Oscilloscope::default();
        let generator = SignalGenerator {
            amplitude: 0.0,
            offset: 2.0,
            ..SignalGenerator::default()
        };

        // DC coupling: trace sits at y_position - offset (2V at 25px/V).
        generator.generate(&mut scope, 0, &mut seeded_rng());
        assert!(scope.channel(0).samples.iter().all(|&s| s == 78));

        // AC coupling gates the offset away.
        scope.channel_mut(1).input_coupling = InputCoupling::Ac;
        generator.generate(&mut scope, 1, &mut seeded_rng());
        assert!(scope.channel(1).samples.iter().all(|&s| s == 128));
    }

    #[test]
    fn test_rising_trigger_crossing_at_sample_zero() {
        let mut scope = Oscilloscope::default();
        scope.channel_mut(0).input_coupling = InputCoupling::Ac;
        scope.trigger.level = 100;

        let generator = SignalGenerator {
            amplitude: 2.0,
            ..SignalGenerator::default()
        };
        generator.generate(&mut scope, 0, &mut seeded_rng());

        let first = i32::from(scope.channel(0).samples[0]);
        assert!((first - 100).abs() <= 1, "first sample {} != 100", first);
    }

    #[test]
    fn test_falling_trigger_crossing_at_sample_zero() {
        let mut scope = Oscilloscope::default();
        scope.channel_mut(0).input_coupling = InputCoupling::Ac;
        scope.trigger.level = 100;
        scope.trigger.slope = TriggerSlope::Falling;

        let generator = SignalGenerator {
            amplitude: 2.0,
            ..SignalGenerator::default()
        };
        generator.generate(&mut scope, 0, &mut seeded_rng());

        let first = i32::from(scope.channel(0).samples[0]);
        assert!((first - 100).abs() <= 1, "first sample {} != 100", first);
    }

    /// Sine at 5V amplitude and 5V offset on a 1V/div channel: the crossing
    /// lands on the trigger level and the lower excursion saturates at 0.
    #[test]
    fn test_full_scale_dc_scenario() {
        let mut scope = Oscilloscope::default();
        assert_eq!(scope.channel(0).volts_per_division, VoltsPerDivision::V1);

        let generator = SignalGenerator::default();
        generator.generate(&mut scope, 0, &mut seeded_rng());

        let samples = scope.channel(0).samples.as_slice();
        let first = i32::from(samples[0]);
        assert!((first - 128).abs() <= 1, "first sample {} != 128", first);

        // Unclamped the sweep would span [-122, 128]; the digitizer saturates
        // the low excursion at 0.
        assert_eq!(samples.iter().min(), Some(&0));
        assert_eq!(samples.iter().max(), Some(&128));
    }

    #[test]
    fn test_unreachable_level_free_runs() {
        let mut scope = Oscilloscope::default();
        // Reachable span is y_position +/- 250; one unit beyond it.
        scope.trigger.level = 128 + 250 + 1;

        let generator = SignalGenerator::default();
        let mut rng = seeded_rng();

        generator.generate(&mut scope, 0, &mut rng);
        let first_pass = scope.channel(0).samples.clone();
        generator.generate(&mut scope, 0, &mut rng);
        let second_pass = scope.channel(0).samples.clone();

        assert_ne!(first_pass, second_pass, "phase was not re-randomized");
        // Still a waveform, not a flat grounded trace.
        assert!(first_pass.iter().any(|&s| s != first_pass[0]));
    }

    /// The phase is drawn once per pass, so adjacent samples of a free-running
    /// sine stay continuous instead of jumping to fresh phases.
    #[test]
    fn test_phase_is_stable_within_a_pass() {
        let mut scope = Oscilloscope::default();
        scope.trigger.level = 1000;

        let generator = SignalGenerator::default();
        generator.generate(&mut scope, 0, &mut seeded_rng());

        let samples = scope.channel(0).samples.as_slice();
        for pair in samples.windows(2) {
            let step = (i32::from(pair[1]) - i32::from(pair[0])).abs();
            assert!(step <= 4, "discontinuity of {} counts", step);
        }
    }

    #[test]
    fn test_square_wave_levels() {
        let mut scope = Oscilloscope::default();
        scope.channel_mut(0).input_coupling = InputCoupling::Ac;

        let generator = SignalGenerator {
            signal_type: SignalType::Square,
            amplitude: 2.0,
            ..SignalGenerator::default()
        };
        generator.generate(&mut scope, 0, &mut seeded_rng());

        let samples = scope.channel(0).samples.as_slice();
        // Rising crossing pins the jump to sample zero: high half-wave first
        // (screen y grows downward, so the high level is the smaller value).
        assert_eq!(samples[0], 78);
        assert!(samples.iter().all(|&s| s == 78 || s == 178));
        assert!(samples.iter().any(|&s| s == 178));
    }

    #[test]
    fn test_triangle_crossing_and_extremes() {
        let mut scope = Oscilloscope::default();
        scope.channel_mut(0).input_coupling = InputCoupling::Ac;

        let generator = SignalGenerator {
            signal_type: SignalType::Triangle,
            amplitude: 2.0,
            ..SignalGenerator::default()
        };
        generator.generate(&mut scope, 0, &mut seeded_rng());

        let samples = scope.channel(0).samples.as_slice();
        assert_eq!(samples[0], 128);
        assert_eq!(samples.iter().min(), Some(&78));
        assert_eq!(samples.iter().max(), Some(&178));
    }

    #[test]
    fn test_pass_leaves_other_channel_untouched() {
        let mut scope = Oscilloscope::default();
        scope.channel_mut(1).samples.fill(99);

        SignalGenerator::default().generate(&mut scope, 0, &mut seeded_rng());

        assert!(scope.channel(1).samples.iter().all(|&s| s == 99));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_invalid_channel_index_panics() {
        let mut scope = Oscilloscope::default();
        SignalGenerator::default().generate(&mut scope, 2, &mut seeded_rng());
    }

    #[test]
    #[should_panic(expected = "frequency must be positive")]
    fn test_non_positive_frequency_panics() {
        let mut scope = Oscilloscope::default();
        let generator = SignalGenerator {
            frequency: 0.0,
            ..SignalGenerator::default()
        };
        generator.generate(&mut scope, 0, &mut seeded_rng());
    }

    #[test]
    fn test_noise_stays_in_band_and_in_range() {
        let mut buffer = SampleBuffer::new(750);
        buffer.fill(128);
        add_noise(&mut buffer, &mut seeded_rng());

        assert!(buffer.iter().all(|&s| (126..=129).contains(&s)));
        assert!(buffer.iter().any(|&s| s != 128), "no noise was added");
    }

    #[test]
    fn test_noise_clamps_at_digitizer_edges() {
        let mut rng = seeded_rng();

        let mut low = SampleBuffer::new(256);
        add_noise(&mut low, &mut rng);
        assert!(low.iter().all(|&s| s <= 1));

        let mut high = SampleBuffer::new(256);
        high.fill(255);
        add_noise(&mut high, &mut rng);
        assert!(high.iter().all(|&s| s >= 253));
    }
}
