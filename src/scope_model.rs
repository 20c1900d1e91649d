//! Passive device state: channels, trigger configuration and sample storage.
//!
//! Nothing in here computes. The command layer mutates these fields between
//! acquisition ticks, the generation pass reads them and writes the target
//! channel's [`SampleBuffer`], and the rendering layer reads the buffers back.
//! Callers must not mutate the model while a pass is in flight for the same
//! channel.

use crate::units::{TimeBase, VoltsPerDivision};
use std::ops::{Index, IndexMut};

/// Multiplier from samples-per-timebase to the full record length of a sweep.
pub const SAMPLES_PER_TIMEBASE_MULTIPLIER: usize = 15;

/// One acquisition sweep of 8-bit samples for a single channel.
///
/// Values are screen-space vertical positions in the digitizer range [0,255],
/// not raw voltages. The length is fixed at construction and never changes
/// during a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<u8>,
}

impl SampleBuffer {
    /// Allocate a zeroed buffer of `len` samples.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero. A zero-length sweep is a caller contract
    /// breach, not a runtime condition.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "sample buffer length must be non-zero");
        Self {
            samples: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u8> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.samples
    }

    /// Overwrite every sample with `value`.
    pub fn fill(&mut self, value: u8) {
        self.samples.fill(value);
    }
}

impl Index<usize> for SampleBuffer {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.samples[index]
    }
}

impl IndexMut<usize> for SampleBuffer {
    fn index_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.samples[index]
    }
}

/// How a channel's input is referenced before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCoupling {
    /// Signal without its DC offset.
    Ac,
    /// Full signal including offset.
    Dc,
    /// Input disconnected, trace forced to the ground reference line.
    Gnd,
}

/// Probe attenuation between the measured circuit and the input stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attenuation {
    X1,
    X10,
}

impl Attenuation {
    pub fn to_multiplier(self) -> i32 {
        match self {
            Attenuation::X1 => 1,
            Attenuation::X10 => 10,
        }
    }
}

/// Crossing direction used for sweep synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSlope {
    Rising,
    Falling,
}

/// How the device re-arms between sweeps. Consumed by the acquisition
/// scheduler, not by the generation pass itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    Run,
    Normal,
    Once,
}

/// Vertical input channel state.
#[derive(Debug, Clone)]
pub struct Channel {
    pub input_coupling: InputCoupling,
    pub volts_per_division: VoltsPerDivision,
    pub attenuation: Attenuation,
    /// Screen-space vertical center of the trace, in sample units.
    pub y_position: i32,
    pub samples: SampleBuffer,
}

impl Channel {
    /// A DC-coupled channel at 1V/div, centered in the digitizer range.
    pub fn new(record_length: usize) -> Self {
        Self {
            input_coupling: InputCoupling::Dc,
            volts_per_division: VoltsPerDivision::V1,
            attenuation: Attenuation::X1,
            y_position: 128,
            samples: SampleBuffer::new(record_length),
        }
    }
}

/// Global trigger configuration shared by both channels.
#[derive(Debug, Clone, Copy)]
pub struct Trigger {
    /// Screen-space vertical coordinate of the trigger threshold.
    pub level: i32,
    pub slope: TriggerSlope,
    /// Index of the source channel.
    pub channel: usize,
    pub mode: TriggerMode,
}

impl Default for Trigger {
    fn default() -> Self {
        Self {
            level: 128,
            slope: TriggerSlope::Rising,
            channel: 0,
            mode: TriggerMode::Run,
        }
    }
}

/// Fixed acquisition parameters of the (virtual) digitizer.
#[derive(Debug, Clone, Copy)]
pub struct DeviceContext {
    pub samples_per_time_base: usize,
}

impl DeviceContext {
    /// Total samples in one sweep record.
    pub fn total_samples(&self) -> usize {
        self.samples_per_time_base * SAMPLES_PER_TIMEBASE_MULTIPLIER
    }
}

impl Default for DeviceContext {
    fn default() -> Self {
        Self {
            samples_per_time_base: 50,
        }
    }
}

/// The full device model: one instance per session.
#[derive(Debug, Clone)]
pub struct Oscilloscope {
    channels: Vec<Channel>,
    pub trigger: Trigger,
    pub time_base: TimeBase,
    pub auto_range: bool,
    pub device_context: DeviceContext,
}

impl Oscilloscope {
    pub const CHANNEL_COUNT: usize = 2;

    pub fn new(device_context: DeviceContext) -> Self {
        let record_length = device_context.total_samples();
        Self {
            channels: (0..Self::CHANNEL_COUNT)
                .map(|_| Channel::new(record_length))
                .collect(),
            trigger: Trigger::default(),
            time_base: TimeBase::Ms1,
            auto_range: false,
            device_context,
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// # Panics
    ///
    /// Panics if `index` is not a valid channel index.
    pub fn channel(&self, index: usize) -> &Channel {
        assert!(
            index < self.channels.len(),
            "channel index {} out of range, must be below {}",
            index,
            self.channels.len()
        );
        &self.channels[index]
    }

    /// # Panics
    ///
    /// Panics if `index` is not a valid channel index.
    pub fn channel_mut(&mut self, index: usize) -> &mut Channel {
        assert!(
            index < self.channels.len(),
            "channel index {} out of range, must be below {}",
            index,
            self.channels.len()
        );
        &mut self.channels[index]
    }
}

impl Default for Oscilloscope {
    fn default() -> Self {
        Self::new(DeviceContext::default())
    }
}
