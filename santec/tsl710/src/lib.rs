//! A rust driver for the Santec TSL-710 tunable laser.
//!
//! The laser is addressed as a GPIB/VISA resource and speaks a SCPI-like command set. The
//! driver covers emission control, power and attenuation, the spectral setting as either a
//! wavelength or a frequency, and the wavelength sweep configuration.
//!
//! The instrument reports power readings in whatever power unit is currently active. The
//! driver keeps the active unit cached so readings can be returned unitful; if the unit is
//! changed on the front panel, refresh the cache with [`Tsl710::get_power_unit`].
//!
//! Note that the spectral setters force the matching spectral unit on the instrument before
//! writing the value: [`Tsl710::set_wavelength`] switches to nanometers,
//! [`Tsl710::set_frequency`] to terahertz. This ordering is what the hardware expects.
//!
//! # Example
//!
//! The driver takes any interface that implements the
//! [`InstrumentInterface`](opticsrs::InstrumentInterface) trait. This example reaches the
//! laser through a GPIB-to-LAN gateway that exposes it as a plain TCP socket; for a local
//! VISA session use `VisaInterfaceTsl710` (cargo feature `visa`) instead.
//! ```no_run
//! use std::{net::TcpStream, time::Duration};
//!
//! use measurements::Length;
//! use opticsrs::Instrument;
//! use santec_tsl710::{LaserState, Tsl710};
//!
//! let channel = TcpStream::connect("192.168.10.7:1234").unwrap();
//! let mut inst = Tsl710::new(Instrument::new(channel, Duration::from_secs(20)));
//!
//! // Tune to 1550 nm and turn the emission on.
//! inst.set_wavelength(Length::from_nanometers(1550.0)).unwrap();
//! inst.set_laser(LaserState::On).unwrap();
//! ```

#![deny(warnings, missing_docs)]

mod units;

pub use units::{
    AttenuationMode, LaserState, PowerUnit, SpectralUnit, SweepDirection, SweepMode, Tsl710Power,
};

use std::sync::{Arc, Mutex};

use opticsrs::{InstrumentError, InstrumentInterface};

use measurements::{Frequency, Length};

#[cfg(feature = "visa")]
use std::time::Duration;
#[cfg(feature = "visa")]
use opticsrs::{Instrument, VisaInterface, VisaPort};

/// A VisaInterface for the TSL-710.
///
/// Builds an OpticsRs VisaInterface with the timeout the laser requires.
///
/// # Example
///
/// ```no_run
/// use santec_tsl710::{Tsl710, VisaInterfaceTsl710};
///
/// // The VISA address of the laser.
/// let address = "GPIB0::1::INSTR";
///
/// let visa_inst = VisaInterfaceTsl710::simple(address).expect("Failed to open VISA resource");
/// let mut inst = Tsl710::new(visa_inst);
/// println!("{}", inst.get_name().unwrap());
/// ```
#[cfg(feature = "visa")]
#[derive(Debug)]
pub struct VisaInterfaceTsl710 {}

#[cfg(feature = "visa")]
impl VisaInterfaceTsl710 {
    /// Create an Instrument interface for the laser at the given VISA address.
    ///
    /// This is analog to the `simple` method of the `VisaInterface` struct in `OpticsRs`,
    /// however, it sets the 20 second timeout the TSL-710 requires; sweep-related queries can
    /// take that long to answer. It fails with [`InstrumentError::ResourceNotFound`] if the
    /// address is not present in the enumerated resource list.
    ///
    /// # Arguments:
    /// - `address` - The VISA resource string, e.g., `"GPIB0::1::INSTR"`.
    pub fn simple(address: &str) -> Result<Instrument<VisaPort>, InstrumentError> {
        VisaInterface::simple(address, Duration::from_millis(20000))
    }
}

/// A rust driver for the Santec TSL-710.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct Tsl710<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
    power_unit: Arc<Mutex<PowerUnit>>,
}

impl<T: InstrumentInterface> Tsl710<T> {
    /// Create a new TSL-710 instance with the given instrument interface.
    ///
    /// The cached power unit starts at the instrument's power-on default (dBm). If the
    /// instrument was left in another unit, call [`Tsl710::get_power_unit`] once to
    /// synchronize the cache.
    ///
    /// # Arguments
    /// - `interface` - An instrument interface that implements the [`InstrumentInterface`]
    ///   trait.
    pub fn new(interface: T) -> Self {
        Tsl710 {
            interface: Arc::new(Mutex::new(interface)),
            power_unit: Arc::new(Mutex::new(PowerUnit::default())),
        }
    }

    /// Query the name of the instrument.
    ///
    /// Returns a comma-separated string of manufacturer, model, serial number, and firmware
    /// version.
    pub fn get_name(&mut self) -> Result<String, InstrumentError> {
        Ok(self.query("*IDN?")?.trim().to_string())
    }

    /// Turn the laser diode emission on or off.
    pub fn set_laser(&mut self, state: LaserState) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("SOUR:PW:STATE {}", state.as_cmd_str()))
    }

    /// Set the laser attenuation in dB.
    pub fn set_attenuation(&mut self, attenuation: f64) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("SOUR:POW:ATT {attenuation}"))
    }

    /// Get the current laser attenuation in dB.
    pub fn get_attenuation(&mut self) -> Result<f64, InstrumentError> {
        let resp = self.query("SOUR:POW:ATT?")?;
        parse_f64(&resp)
    }

    /// Select whether the attenuator is driven manually or follows the power control.
    pub fn set_auto_attenuation(&mut self, mode: AttenuationMode) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("POW:ATT:AUT {}", mode.as_cmd_str()))
    }

    /// Get the active power unit from the instrument.
    ///
    /// This updates the internally kept power unit and returns a copy of it.
    pub fn get_power_unit(&mut self) -> Result<PowerUnit, InstrumentError> {
        let resp = self.query("POW:UNIT?")?;
        let unit = PowerUnit::from_cmd_str(&resp)?;
        {
            let mut current_unit = self.power_unit.lock().expect("Mutex should not be poisoned");
            *current_unit = unit;
        }
        Ok(unit)
    }

    /// Set the power unit of the laser.
    ///
    /// This sets a new unit on the instrument and, if successful, updates the internal unit
    /// representation to match the new unit.
    pub fn set_power_unit(&mut self, unit: PowerUnit) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("POW:UNIT: {}", unit.as_cmd_str()))?;
        {
            let mut current_unit = self.power_unit.lock().expect("Mutex should not be poisoned");
            *current_unit = unit;
        }
        Ok(())
    }

    /// Get the power set level of the laser, in the active power unit.
    pub fn get_set_power(&mut self) -> Result<Tsl710Power, InstrumentError> {
        let resp = self.query("POW?")?;
        let val = parse_f64(&resp)?;
        let unit = self.power_unit.lock().expect("Mutex should not be poisoned");
        Ok(units::from_value_unit(val, &unit))
    }

    /// Get the actual, monitored power level of the laser, in the active power unit.
    pub fn get_power(&mut self) -> Result<Tsl710Power, InstrumentError> {
        let resp = self.query("POW:ACT?")?;
        let val = parse_f64(&resp)?;
        let unit = self.power_unit.lock().expect("Mutex should not be poisoned");
        Ok(units::from_value_unit(val, &unit))
    }

    /// Set the power level of the laser.
    ///
    /// The given power unit is activated on the instrument first, then the value is written
    /// in that unit. The ordering is required by the hardware.
    ///
    /// # Arguments
    /// - `unit` - The power unit to set the level in.
    /// - `power` - The power level in the given unit.
    pub fn set_power(&mut self, unit: PowerUnit, power: f64) -> Result<(), InstrumentError> {
        self.set_power_unit(unit)?;
        self.sendcmd(&format!("POW: {power}"))
    }

    /// Set the spectral unit of the laser to wavelength or frequency.
    ///
    /// Usually there is no need to call this directly: [`Tsl710::set_wavelength`] and
    /// [`Tsl710::set_frequency`] force the matching unit themselves.
    pub fn set_spectral_unit(&mut self, unit: SpectralUnit) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("WAV:UNIT: {}", unit.as_cmd_str()))
    }

    /// Get the emission wavelength of the laser.
    pub fn get_wavelength(&mut self) -> Result<Length, InstrumentError> {
        let resp = self.query("WAV?")?;
        let val = parse_f64(&resp)?;
        Ok(Length::from_nanometers(val))
    }

    /// Set the emission wavelength of the laser.
    ///
    /// The spectral unit is switched to nanometers first, then the wavelength is written in
    /// nanometers. The ordering is required by the hardware.
    pub fn set_wavelength(&mut self, wavelength: Length) -> Result<(), InstrumentError> {
        self.set_spectral_unit(SpectralUnit::Nanometer)?;
        self.sendcmd(&format!("WAV {}", wavelength.as_nanometers()))
    }

    /// Get the emission frequency of the laser.
    pub fn get_frequency(&mut self) -> Result<Frequency, InstrumentError> {
        let resp = self.query("FREQ?")?;
        let val = parse_f64(&resp)?;
        Ok(Frequency::from_terahertz(val))
    }

    /// Set the emission frequency of the laser.
    ///
    /// The spectral unit is switched to terahertz first, then the frequency is written in
    /// terahertz. The ordering is required by the hardware.
    pub fn set_frequency(&mut self, frequency: Frequency) -> Result<(), InstrumentError> {
        self.set_spectral_unit(SpectralUnit::Terahertz)?;
        self.sendcmd(&format!("FREQ {}", frequency.as_terahertz()))
    }

    /// Get the number of cycles for a wavelength sweep.
    ///
    /// The instrument reports the count as a float; it is truncated to an integer here.
    pub fn get_sweep_cycles(&mut self) -> Result<u32, InstrumentError> {
        let resp = self.query("WAV:SWE:CYCL?")?;
        let val = parse_f64(&resp)?;
        Ok(val as u32)
    }

    /// Set the number of cycles for a wavelength sweep.
    pub fn set_sweep_cycles(&mut self, cycles: u32) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("WAV:SWE:CYCL {cycles}"))
    }

    /// Set the sweep mode of the laser from a stepping behavior and a direction.
    pub fn set_sweep_mode(
        &mut self,
        mode: SweepMode,
        direction: SweepDirection,
    ) -> Result<(), InstrumentError> {
        self.sendcmd(&format!(
            "WAV:SWE:MOD {}",
            units::sweep_mode_code(mode, direction)
        ))
    }

    /// Set the sweep speed of the laser in nm/s.
    pub fn set_sweep_speed(&mut self, speed: f64) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("WAV:SWE:SPE {speed}"))
    }

    /// Send a command to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.sendcmd(cmd)
    }

    /// Query the instrument with a command and return the response as a String.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.query(cmd)
    }
}

impl<T: InstrumentInterface> Clone for Tsl710<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
            power_unit: self.power_unit.clone(),
        }
    }
}

/// Parse an instrument response as a float.
fn parse_f64(resp: &str) -> Result<f64, InstrumentError> {
    resp.trim()
        .parse::<f64>()
        .map_err(|_| InstrumentError::ResponseParseError(resp.to_string()))
}
