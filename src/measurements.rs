//! Signal measurements over an acquired sweep.
//!
//! Converts a channel's screen-unit samples back to volts through the
//! channel's vertical scale, probe attenuation and trace center, then reduces
//! them to the readouts shown next to each channel.

use crate::scope_model::Channel;
use crate::units::PIXELS_PER_DIVISION;
use std::fmt;

/// Readout selectable for a channel's measurement label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalUnit {
    /// Mean voltage.
    Vdc,
    /// Root-mean-square voltage.
    Vrms,
    Vmin,
    Vmax,
    /// Peak-to-peak voltage.
    Vptp,
}

impl fmt::Display for SignalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignalUnit::Vdc => "Vdc",
            SignalUnit::Vrms => "Vrms",
            SignalUnit::Vmin => "Vmin",
            SignalUnit::Vmax => "Vmax",
            SignalUnit::Vptp => "Vptp",
        };
        f.write_str(label)
    }
}

/// Compute the selected readout, in volts, from the channel's current sweep.
pub fn measure(channel: &Channel, unit: SignalUnit) -> f64 {
    let count = channel.samples.len() as f64;
    let volts = || channel.samples.iter().map(|&s| sample_to_volts(channel, s));

    match unit {
        SignalUnit::Vdc => volts().sum::<f64>() / count,
        SignalUnit::Vrms => (volts().map(|v| v * v).sum::<f64>() / count).sqrt(),
        SignalUnit::Vmin => volts().fold(f64::INFINITY, f64::min),
        SignalUnit::Vmax => volts().fold(f64::NEG_INFINITY, f64::max),
        SignalUnit::Vptp => {
            volts().fold(f64::NEG_INFINITY, f64::max) - volts().fold(f64::INFINITY, f64::min)
        }
    }
}

/// Voltage represented by one stored sample. Screen y grows downward, so
/// samples above the trace center are negative voltages.
fn sample_to_volts(channel: &Channel, sample: u8) -> f64 {
    let volts_per_pixel = channel.volts_per_division.to_volts() / PIXELS_PER_DIVISION;
    f64::from(channel.y_position - i32::from(sample))
        * volts_per_pixel
        * f64::from(channel.attenuation.to_multiplier())
}
