//! This module provides constructors for instruments controlled via a serial port.
//!
//! It builds a blocking [`Instrument`] on top of the [`serialport`] crate. Drivers in this
//! workspace typically wrap these constructors with the line parameters their device requires.

use std::time::Duration;

use serialport::{SerialPort, SerialPortBuilder};

use crate::{Instrument, InstrumentError};

/// Constructors for a blocking serial [`Instrument`] using the [`serialport`] crate.
///
/// # Example
///
/// ```no_run
/// use opticsrs::SerialInterface;
///
/// let interface = SerialInterface::simple("/dev/ttyUSB0", 115200).unwrap();
/// ```
#[derive(Debug)]
pub struct SerialInterface {}

impl SerialInterface {
    /// Create an [`Instrument`] with a simple serial port configuration.
    ///
    /// The port is opened with the `serialport` defaults (8 data bits, no parity, 1 stop bit)
    /// and a timeout of 3 seconds. Use [`SerialInterface::full`] if your device needs other
    /// line parameters.
    ///
    /// # Arguments:
    /// - `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    /// - `baud_rate` - The baud rate to use for communication.
    pub fn simple(
        port: &str,
        baud_rate: u32,
    ) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let spb = serialport::new(port, baud_rate).timeout(Duration::from_secs(3));
        Self::full(spb)
    }

    /// Create an [`Instrument`] from a fully configured [`SerialPortBuilder`].
    ///
    /// The timeout configured on the builder is carried over to the instrument interface.
    ///
    /// # Arguments:
    /// - `spb` - A `SerialPortBuilder` to configure the serial port. See
    ///   [`serialport::SerialPortBuilder`] and the [`serialport::new`] function for details.
    pub fn full(spb: SerialPortBuilder) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let port = spb.open()?;
        let timeout = port.timeout();
        Ok(Instrument::new(port, timeout))
    }
}
