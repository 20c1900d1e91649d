//! Enumerated vertical and horizontal scales and their physical conversions.
//!
//! Both enums cover the instrument's 1-2-5 series. The converters are total:
//! every variant maps to a fixed physical value, so there is no failure path.

use std::fmt;

/// Vertical screen pixels spanned by one grid division.
pub const PIXELS_PER_DIVISION: f64 = 25.0;

/// Vertical sensitivity, volts per grid division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoltsPerDivision {
    Mv5,
    Mv10,
    Mv20,
    Mv50,
    Mv100,
    Mv200,
    Mv500,
    V1,
    V2,
    V5,
    V10,
    V20,
}

impl VoltsPerDivision {
    /// All settings in ascending order, used for cyclic stepping.
    pub const ALL: [Self; 12] = [
        Self::Mv5,
        Self::Mv10,
        Self::Mv20,
        Self::Mv50,
        Self::Mv100,
        Self::Mv200,
        Self::Mv500,
        Self::V1,
        Self::V2,
        Self::V5,
        Self::V10,
        Self::V20,
    ];

    /// Physical volts represented by one vertical division.
    pub fn to_volts(self) -> f64 {
        match self {
            Self::Mv5 => 0.005,
            Self::Mv10 => 0.01,
            Self::Mv20 => 0.02,
            Self::Mv50 => 0.05,
            Self::Mv100 => 0.1,
            Self::Mv200 => 0.2,
            Self::Mv500 => 0.5,
            Self::V1 => 1.0,
            Self::V2 => 2.0,
            Self::V5 => 5.0,
            Self::V10 => 10.0,
            Self::V20 => 20.0,
        }
    }

    /// Step `steps` positions through the scale series, wrapping at both ends.
    pub fn cycle(self, steps: i32) -> Self {
        cycle_through(&Self::ALL, self, steps)
    }
}

impl fmt::Display for VoltsPerDivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Mv5 => "5mV/div",
            Self::Mv10 => "10mV/div",
            Self::Mv20 => "20mV/div",
            Self::Mv50 => "50mV/div",
            Self::Mv100 => "100mV/div",
            Self::Mv200 => "200mV/div",
            Self::Mv500 => "500mV/div",
            Self::V1 => "1V/div",
            Self::V2 => "2V/div",
            Self::V5 => "5V/div",
            Self::V10 => "10V/div",
            Self::V20 => "20V/div",
        };
        f.write_str(label)
    }
}

/// Horizontal sweep speed, time per grid division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBase {
    Us1,
    Us2,
    Us5,
    Us10,
    Us20,
    Us50,
    Us100,
    Us200,
    Us500,
    Ms1,
    Ms2,
    Ms5,
    Ms10,
    Ms20,
    Ms50,
    Ms100,
    Ms200,
    Ms500,
    S1,
}

impl TimeBase {
    /// All settings from fastest to slowest, used for cyclic stepping.
    pub const ALL: [Self; 19] = [
        Self::Us1,
        Self::Us2,
        Self::Us5,
        Self::Us10,
        Self::Us20,
        Self::Us50,
        Self::Us100,
        Self::Us200,
        Self::Us500,
        Self::Ms1,
        Self::Ms2,
        Self::Ms5,
        Self::Ms10,
        Self::Ms20,
        Self::Ms50,
        Self::Ms100,
        Self::Ms200,
        Self::Ms500,
        Self::S1,
    ];

    /// Physical seconds represented by one horizontal division.
    pub fn to_seconds(self) -> f64 {
        match self {
            Self::Us1 => 1e-6,
            Self::Us2 => 2e-6,
            Self::Us5 => 5e-6,
            Self::Us10 => 1e-5,
            Self::Us20 => 2e-5,
            Self::Us50 => 5e-5,
            Self::Us100 => 1e-4,
            Self::Us200 => 2e-4,
            Self::Us500 => 5e-4,
            Self::Ms1 => 1e-3,
            Self::Ms2 => 2e-3,
            Self::Ms5 => 5e-3,
            Self::Ms10 => 1e-2,
            Self::Ms20 => 2e-2,
            Self::Ms50 => 5e-2,
            Self::Ms100 => 1e-1,
            Self::Ms200 => 2e-1,
            Self::Ms500 => 5e-1,
            Self::S1 => 1.0,
        }
    }

    /// Generated samples per horizontal division.
    ///
    /// The two fastest sweeps are undersampled by the virtual digitizer; every
    /// other timebase runs at the full 50 samples per division.
    pub fn samples_per_division(self) -> u32 {
        match self {
            Self::Us1 => 10,
            Self::Us2 => 20,
            _ => 50,
        }
    }

    /// Step `steps` positions through the sweep series, wrapping at both ends.
    pub fn cycle(self, steps: i32) -> Self {
        cycle_through(&Self::ALL, self, steps)
    }
}

impl fmt::Display for TimeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Us1 => "1µs/div",
            Self::Us2 => "2µs/div",
            Self::Us5 => "5µs/div",
            Self::Us10 => "10µs/div",
            Self::Us20 => "20µs/div",
            Self::Us50 => "50µs/div",
            Self::Us100 => "100µs/div",
            Self::Us200 => "200µs/div",
            Self::Us500 => "500µs/div",
            Self::Ms1 => "1ms/div",
            Self::Ms2 => "2ms/div",
            Self::Ms5 => "5ms/div",
            Self::Ms10 => "10ms/div",
            Self::Ms20 => "20ms/div",
            Self::Ms50 => "50ms/div",
            Self::Ms100 => "100ms/div",
            Self::Ms200 => "200ms/div",
            Self::Ms500 => "500ms/div",
            Self::S1 => "1s/div",
        };
        f.write_str(label)
    }
}

fn cycle_through<T: Copy + PartialEq>(all: &[T], current: T, steps: i32) -> T {
    let index = all
        .iter()
        .position(|v| *v == current)
        .expect("enum variant missing from its ALL table");
    let len = all.len() as i32;
    let next = (index as i32 + steps).rem_euclid(len);
    all[next as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volts_per_division_table() {
        let expected = [
            0.005, 0.01, 0.02, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0,
        ];
        for (setting, volts) in VoltsPerDivision::ALL.iter().zip(expected) {
            assert_eq!(setting.to_volts(), volts);
        }
    }

    #[test]
    fn test_time_base_table() {
        let expected = [
            1e-6, 2e-6, 5e-6, 1e-5, 2e-5, 5e-5, 1e-4, 2e-4, 5e-4, 1e-3, 2e-3, 5e-3, 1e-2, 2e-2,
            5e-2, 1e-1, 2e-1, 5e-1, 1.0,
        ];
        for (setting, seconds) in TimeBase::ALL.iter().zip(expected) {
            assert_eq!(setting.to_seconds(), seconds);
        }
    }

    #[test]
    fn test_samples_per_division() {
        assert_eq!(TimeBase::Us1.samples_per_division(), 10);
        assert_eq!(TimeBase::Us2.samples_per_division(), 20);
        // Everything slower runs at the default rate.
        for setting in &TimeBase::ALL[2..] {
            assert_eq!(setting.samples_per_division(), 50);
        }
    }

    #[test]
    fn test_cycle_wraps_around() {
        assert_eq!(VoltsPerDivision::V20.cycle(1), VoltsPerDivision::Mv5);
        assert_eq!(VoltsPerDivision::Mv5.cycle(-1), VoltsPerDivision::V20);
        assert_eq!(VoltsPerDivision::V1.cycle(2), VoltsPerDivision::V5);
        assert_eq!(TimeBase::S1.cycle(1), TimeBase::Us1);
        assert_eq!(TimeBase::Us1.cycle(-1), TimeBase::S1);
        assert_eq!(TimeBase::Ms1.cycle(0), TimeBase::Ms1);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(VoltsPerDivision::Mv5.to_string(), "5mV/div");
        assert_eq!(VoltsPerDivision::V1.to_string(), "1V/div");
        assert_eq!(TimeBase::Us1.to_string(), "1µs/div");
        assert_eq!(TimeBase::S1.to_string(), "1s/div");
    }
}
