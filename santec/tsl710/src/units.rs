//! Module to handle instrument specific option codes, units, and conversions.
//!
//! The TSL-710 encodes every enumerated setting as a small integer on the wire. The enums in
//! this module map those codes exhaustively, so an invalid option cannot be constructed by a
//! caller; an unknown code coming back from the instrument surfaces as a
//! [`InstrumentError::ResponseParseError`](opticsrs::InstrumentError).

use std::fmt::Display;

use measurements::Power;

/// The output state of the laser diode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserState {
    /// Laser diode emission on.
    On,
    /// Laser diode emission off.
    Off,
}

impl LaserState {
    /// Convert the laser state to the code used in commands.
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            LaserState::On => "1",
            LaserState::Off => "0",
        }
    }
}

impl Display for LaserState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaserState::On => write!(f, "ON"),
            LaserState::Off => write!(f, "OFF"),
        }
    }
}

/// All the power units the TSL-710 can be configured to use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PowerUnit {
    /// Decibel-milliwatts. This is the power-on default of the instrument.
    #[default]
    Dbm,
    /// Milliwatts.
    MilliWatt,
}

impl PowerUnit {
    /// Convert the power unit to the code used in commands.
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            PowerUnit::Dbm => "0",
            PowerUnit::MilliWatt => "1",
        }
    }

    /// Convert a power unit code from the instrument to a `PowerUnit`.
    pub(crate) fn from_cmd_str(value: &str) -> Result<Self, opticsrs::InstrumentError> {
        match value.trim() {
            "0" => Ok(PowerUnit::Dbm),
            "1" => Ok(PowerUnit::MilliWatt),
            _ => Err(opticsrs::InstrumentError::ResponseParseError(
                value.to_string(),
            )),
        }
    }
}

impl Display for PowerUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerUnit::Dbm => write!(f, "dBm"),
            PowerUnit::MilliWatt => write!(f, "mW"),
        }
    }
}

/// The spectral units the TSL-710 can express its emission setting in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SpectralUnit {
    /// Wavelength in nanometers.
    #[default]
    Nanometer,
    /// Frequency in terahertz.
    Terahertz,
}

impl SpectralUnit {
    /// Convert the spectral unit to the code used in commands.
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            SpectralUnit::Nanometer => "0",
            SpectralUnit::Terahertz => "1",
        }
    }
}

impl Display for SpectralUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectralUnit::Nanometer => write!(f, "nm"),
            SpectralUnit::Terahertz => write!(f, "THz"),
        }
    }
}

/// Whether the attenuator is driven manually or follows the power control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttenuationMode {
    /// The attenuation is set manually.
    Manual,
    /// The attenuation follows the power control automatically.
    Automatic,
}

impl AttenuationMode {
    /// Convert the attenuation mode to the code used in commands.
    pub(crate) fn as_cmd_str(&self) -> &str {
        match self {
            AttenuationMode::Manual => "0",
            AttenuationMode::Automatic => "1",
        }
    }
}

/// The stepping behavior of a wavelength sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    /// Stepwise sweep, the laser dwells at each wavelength.
    Step,
    /// Continuous sweep.
    Continuous,
}

/// The direction of a wavelength sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// Sweep from start to stop wavelength only.
    OneWay,
    /// Sweep from start to stop wavelength and back.
    TwoWay,
}

/// Combine sweep mode and direction into the code used in commands.
///
/// One-way sweeps use codes 0 (step) and 1 (continuous); their two-way counterparts are
/// shifted by 2.
pub(crate) fn sweep_mode_code(mode: SweepMode, direction: SweepDirection) -> u8 {
    let base = match mode {
        SweepMode::Step => 0,
        SweepMode::Continuous => 1,
    };
    match direction {
        SweepDirection::OneWay => base,
        SweepDirection::TwoWay => base + 2,
    }
}

/// A power reading in the unit the laser is currently configured to use.
///
/// dBm is a logarithmic quantity that the [`measurements`] crate has no type for, so readings
/// in dBm are returned as a plain float, while readings in milliwatts are returned unitful.
#[derive(Debug, Clone, PartialEq)]
pub enum Tsl710Power {
    /// Power in decibel-milliwatts.
    Dbm(f64),
    /// Power as a unitful value (reported by the instrument in milliwatts).
    MilliWatt(Power),
}

impl Display for Tsl710Power {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tsl710Power::Dbm(v) => write!(f, "{v} dBm"),
            Tsl710Power::MilliWatt(p) => write!(f, "{p}"),
        }
    }
}

/// Convert a value and instrument power unit into a `Tsl710Power`.
pub(crate) fn from_value_unit(value: f64, unit: &PowerUnit) -> Tsl710Power {
    match unit {
        PowerUnit::Dbm => Tsl710Power::Dbm(value),
        PowerUnit::MilliWatt => Tsl710Power::MilliWatt(Power::from_milliwatts(value)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(SweepMode::Step, SweepDirection::OneWay, 0)]
    #[case(SweepMode::Continuous, SweepDirection::OneWay, 1)]
    #[case(SweepMode::Step, SweepDirection::TwoWay, 2)]
    #[case(SweepMode::Continuous, SweepDirection::TwoWay, 3)]
    fn test_sweep_mode_code(
        #[case] mode: SweepMode,
        #[case] direction: SweepDirection,
        #[case] expected: u8,
    ) {
        assert_eq!(sweep_mode_code(mode, direction), expected);
    }

    #[rstest]
    fn test_power_unit_roundtrip() {
        for unit in [PowerUnit::Dbm, PowerUnit::MilliWatt] {
            assert_eq!(PowerUnit::from_cmd_str(unit.as_cmd_str()).unwrap(), unit);
        }
    }

    #[rstest]
    fn test_power_unit_bad_code() {
        assert!(PowerUnit::from_cmd_str("7").is_err());
    }

    #[rstest]
    fn test_from_value_unit() {
        assert_eq!(
            from_value_unit(0.0, &PowerUnit::Dbm),
            Tsl710Power::Dbm(0.0)
        );
        let mw = from_value_unit(1.5, &PowerUnit::MilliWatt);
        if let Tsl710Power::MilliWatt(p) = mw {
            assert_eq!(p.as_milliwatts(), 1.5);
        } else {
            panic!("Expected a milliwatt measurement.");
        }
    }
}
