//! This module provides the main implementation for the Instrument Interface trait.
//!
//! It can be called with any type that implements [`std::io::Read`] and [`std::io::Write`],
//! such as [`std::net::TcpStream`], [`serialport::SerialPort`], or a VISA session.

use std::time::Duration;

use crate::{InstrumentError, InstrumentInterface};

/// A general instrument interface that can be built with any interface that implements
/// [`std::io::Read`] and [`std::io::Write`].
///
/// This struct can be used to communicate with instruments over the various interfaces. Handy
/// shortcuts for creating various interfaces are provided as well (see `SerialInterface` and
/// `VisaInterface` behind their respective cargo features). However, this general
/// implementation can also be used with any other types that are not provided by `OpticsRs`.
///
/// # Example
///
/// The following shows a simple example on how to create an [`Instrument`] interface from your
/// own interface that implements [`std::io::Read`] and [`std::io::Write`].
///
/// ```no_run
/// use std::{net::TcpStream, time::Duration};
///
/// use opticsrs::Instrument;
///
/// let my_interface = TcpStream::connect("192.168.10.1:8000").unwrap();
/// let inst_interface = Instrument::new(my_interface, Duration::from_secs(3));
/// ```
pub struct Instrument<P: std::io::Read + std::io::Write> {
    port: P,
    terminator: String,
    timeout: Duration,
}

impl<P: std::io::Read + std::io::Write> Instrument<P> {
    /// Create a new instance of [`Instrument`] with a given interface.
    pub fn new(port: P, timeout: Duration) -> Self {
        Self {
            port,
            terminator: "\n".to_string(),
            timeout,
        }
    }
}

impl<P: std::io::Read + std::io::Write> InstrumentInterface for Instrument<P> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        self.port.read_exact(buf)?;
        Ok(())
    }

    fn get_terminator(&self) -> &str {
        self.terminator.as_str()
    }

    fn set_terminator(&mut self, terminator: &str) {
        self.terminator = terminator.to_string();
    }

    fn get_timeout(&self) -> Duration {
        self.timeout
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }
}
