//! A rust driver for ThorLabs PM100-series optical power meters.
//!
//! The power meter is addressed as a VISA resource and speaks SCPI with `"\n"` terminated
//! lines on both write and read. Besides the measured optical power, the driver exposes the
//! correction wavelength, the beam diameter, the sensor current, and the averaging rate.
//!
//! # Example
//!
//! The driver takes any interface that implements the
//! [`InstrumentInterface`](opticsrs::InstrumentInterface) trait. This example reaches the
//! power meter through an instrument gateway that exposes it as a plain TCP socket; for a
//! local VISA session use `VisaInterfacePm100` (cargo feature `visa`) instead.
//! ```no_run
//! use std::{net::TcpStream, time::Duration};
//!
//! use opticsrs::Instrument;
//! use thorlabs_pm100::Pm100;
//!
//! let channel = TcpStream::connect("192.168.10.5:1234").unwrap();
//! let mut inst = Pm100::new(Instrument::new(channel, Duration::from_secs(3)));
//!
//! // Query the name of the instrument
//! println!("{}", inst.get_name().unwrap());
//!
//! // Print the measured optical power
//! println!("Measured power: {}", inst.get_power().unwrap());
//! ```

#![deny(warnings, missing_docs)]

use std::sync::{Arc, Mutex};

use opticsrs::{InstrumentError, InstrumentInterface};

use measurements::{Current, Length, Power};

#[cfg(feature = "visa")]
use std::time::Duration;
#[cfg(feature = "visa")]
use opticsrs::{Instrument, VisaInterface, VisaPort};

/// A VisaInterface for the PM100.
///
/// Builds an OpticsRs VisaInterface with the timeout the power meter requires.
///
/// # Example
///
/// ```no_run
/// use thorlabs_pm100::{Pm100, VisaInterfacePm100};
///
/// // The VISA address of the power meter.
/// let address = "USB0::0x1313::0x807B::201103226::INSTR";
///
/// let visa_inst = VisaInterfacePm100::simple(address).expect("Failed to open VISA resource");
/// let mut inst = Pm100::new(visa_inst);
/// println!("{}", inst.get_name().unwrap());
/// ```
#[cfg(feature = "visa")]
#[derive(Debug)]
pub struct VisaInterfacePm100 {}

#[cfg(feature = "visa")]
impl VisaInterfacePm100 {
    /// Create an Instrument interface for the power meter at the given VISA address.
    ///
    /// This is analog to the `simple` method of the `VisaInterface` struct in `OpticsRs` with
    /// the default timeout of 3 seconds. It fails with
    /// [`InstrumentError::ResourceNotFound`] if the address is not present in the enumerated
    /// resource list.
    ///
    /// # Arguments:
    /// - `address` - The VISA resource string, e.g., `"USB0::0x1313::0x807B::201103226::INSTR"`.
    pub fn simple(address: &str) -> Result<Instrument<VisaPort>, InstrumentError> {
        VisaInterface::simple(address, Duration::from_secs(3))
    }
}

/// A rust driver for the ThorLabs PM100.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct Pm100<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> Pm100<T> {
    /// Create a new PM100 instance with the given instrument interface.
    ///
    /// # Arguments
    /// - `interface` - An instrument interface that implements the [`InstrumentInterface`]
    ///   trait.
    pub fn new(interface: T) -> Self {
        Pm100 {
            interface: Arc::new(Mutex::new(interface)),
        }
    }

    /// Query the name of the instrument.
    ///
    /// Returns a comma-separated string of manufacturer, model, serial number, and firmware
    /// version.
    pub fn get_name(&mut self) -> Result<String, InstrumentError> {
        Ok(self.query("*IDN?")?.trim().to_string())
    }

    /// Get the measured optical power.
    pub fn get_power(&mut self) -> Result<Power, InstrumentError> {
        let resp = self.query("READ?")?;
        let val = parse_f64(&resp)?;
        Ok(Power::from_watts(val))
    }

    /// Get the current correction wavelength of the power meter.
    pub fn get_wavelength(&mut self) -> Result<Length, InstrumentError> {
        let resp = self.query("SENS:CORR:WAV?")?;
        let val = parse_f64(&resp)?;
        Ok(Length::from_nanometers(val))
    }

    /// Set the correction wavelength of the power meter.
    ///
    /// # Arguments
    /// - `wavelength` - The wavelength to correct for; sent to the instrument in nanometers.
    pub fn set_wavelength(&mut self, wavelength: Length) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("SENS:CORR:WAV {}", wavelength.as_nanometers()))
    }

    /// Get the current beam diameter.
    pub fn get_beam_diameter(&mut self) -> Result<Length, InstrumentError> {
        let resp = self.query("SENS:CORR:BEAM?")?;
        let val = parse_f64(&resp)?;
        Ok(Length::from_millimeters(val))
    }

    /// Set the beam diameter of the power meter.
    ///
    /// # Arguments
    /// - `diameter` - The beam diameter; sent to the instrument in millimeters.
    pub fn set_beam_diameter(&mut self, diameter: Length) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("SENS:CORR:BEAM {}", diameter.as_millimeters()))
    }

    /// Get the sensor current of the measured beam.
    pub fn get_current(&mut self) -> Result<Current, InstrumentError> {
        let resp = self.query("MEAS:CURR?")?;
        let val = parse_f64(&resp)?;
        Ok(Current::from_amperes(val))
    }

    /// Set the averaging rate of the power meter.
    ///
    /// One sample takes roughly 3 ms; the averaging rate is the number of samples averaged
    /// per returned reading.
    ///
    /// # Arguments
    /// - `rate` - The number of samples to average.
    pub fn set_averaging_rate(&mut self, rate: u16) -> Result<(), InstrumentError> {
        self.sendcmd(&format!("SENS:AVER:{rate}"))
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

impl<T: InstrumentInterface> Clone for Pm100<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}

/// Parse an instrument response as a float.
fn parse_f64(resp: &str) -> Result<f64, InstrumentError> {
    resp.trim()
        .parse::<f64>()
        .map_err(|_| InstrumentError::ResponseParseError(resp.to_string()))
}
