//! OpticsRs: Talk to your optics-lab equipment from Rust
//!
//! The OpticsRs library provides standardized interfaces to talk to optical laboratory
//! equipment via various ports. To do so, it provides an [`InstrumentInterface`] trait and its
//! implementations. Furthermore, we also provide an [`InstrumentError`] error type that
//! instrument drivers should return.
//!
//! # Currently implemented interfaces are:
//! - Serial (blocking) using the [`serialport`] crate (cargo feature `serial`).
//! - GPIB/USB/VISA (blocking) using the [`visa_rs`] crate (cargo feature `visa`). This
//!   requires a VISA library (e.g., NI-VISA) to be installed on your system.
//!
//! Any other byte channel that implements [`std::io::Read`] and [`std::io::Write`] can be
//! wrapped in an [`Instrument`] as well.
//!
//! # Goals and non-goals of this project
//!
//! OpticsRs provides the transport layer and error type for the instrument drivers that live
//! in this workspace (rotation mount, power meter, tunable laser). A driver takes any
//! interface that implements the [`InstrumentInterface`] trait, which means the same driver
//! works over a serial line, a VISA session, or the [`LoopbackInterfaceString`] used for
//! testing. There is no protocol negotiation, no retry logic, and no multi-instrument
//! synchronization: one interface, one caller, synchronous request/response. If you need any
//! of these, layer them on top.
//!
//! # License
//!
//! Licensed under either of
//!
//! - Apache License, Version 2.0 ([LICENSE-APACHE](http://www.apache.org/licenses/LICENSE-2.0))
//! - MIT license ([LICENSE-MIT](http://opensource.org/licenses/MIT))
//!
//! at your option.

#![warn(missing_docs)]

mod instrument;
mod loopback;
#[cfg(feature = "serial")]
mod serial;
#[cfg(feature = "visa")]
mod visa;

pub use instrument::Instrument;
pub use loopback::LoopbackInterfaceString;
#[cfg(feature = "serial")]
pub use serial::SerialInterface;
#[cfg(feature = "visa")]
pub use visa::{VisaInterface, VisaPort};

use std::time::{Duration, Instant};

use thiserror::Error;

/// The error enum for all instruments.
///
/// For any command sending or querying, your instrument driver should return either an empty
/// result or a result with the query where this Error is the alternative. [`InstrumentError`]
/// makes it easy to propagate all the sending commands, querying errors forward with the `?`
/// operator such that errors propagate nicely. If this is not possible, it is considered a bug
/// and should be reported.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstrumentError {
    /// Error when an invalid argument is passed to a function. This error contains only an
    /// error message, but no arguments. It is intended for the user.
    #[error("{0}")]
    InvalidArgument(String),
    /// Error when reading from/writing to an interface. See [`std::io::Error`] for more details.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The requested VISA address is not present in the enumerated resource list. Check that
    /// the instrument is connected and powered on.
    #[error("VISA resource {address} is not present in the enumerated resource list.")]
    ResourceNotFound {
        /// The address that was requested.
        address: String,
    },
    /// Instrument response could not be parsed because it was unexpected by the driver. This
    /// error contains the response that was received from the instrument.
    #[error("Response from instrument could not be parsed. Response was: {0}")]
    ResponseParseError(String),
    #[cfg(feature = "serial")]
    /// Serial port errors can occur when opening a serial interface. See the
    /// [`serialport::Error`] documentation for more information.
    #[error(transparent)]
    Serialport(#[from] serialport::Error),
    /// Timeout occurred while waiting for a response from the instrument. The error contains
    /// the timeout that was exceeded.
    #[error(
        "Timeout occured while waiting for a response from the instrument. Timeout was set to {0:?}."
    )]
    Timeout(Duration),
    /// Timeout occurred while waiting for a response to a query. The error contains the query
    /// that was sent and the timeout that was exceeded.
    #[error(
        "Timeout occured while waiting for a response to query: {query}. Timeout was set to {timeout:?}."
    )]
    TimeoutQuery {
        /// The query that timed out.
        query: String,
        /// The timeout that was set.
        timeout: Duration,
    },
    #[cfg(feature = "visa")]
    /// VISA errors can occur when opening a session to a resource or talking to it. See the
    /// [`visa_rs::Error`] documentation for more information.
    #[error(transparent)]
    Visa(#[from] visa_rs::Error),
}

/// The `InstrumentInterface` trait defines the interface for controlling instruments.
///
/// Implementors only need to provide the raw [`read_exact`](InstrumentInterface::read_exact)
/// and [`write_raw`](InstrumentInterface::write_raw) methods; command sending, querying, and
/// line-wise reading are provided on top of these. Drivers should only ever call the provided
/// methods.
pub trait InstrumentInterface {
    /// Read exactly `buf.len()` bytes from the interface into the given buffer.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError>;

    /// Write raw bytes to the interface and flush it, so that data is sent out immediately.
    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError>;

    /// Get the current terminator of the interface.
    fn get_terminator(&self) -> &str {
        "\n"
    }

    /// Set the terminator of an interface from a `&str`.
    ///
    /// # Arguments:
    /// - `_terminator` - A string slice that will be used as the terminator for commands.
    fn set_terminator(&mut self, _terminator: &str) {}

    /// Get the timeout of the interface.
    fn get_timeout(&self) -> Duration {
        Duration::from_secs(3)
    }

    /// Send a command to the instrument.
    ///
    /// This function takes the command, appends the terminator, and writes it to the
    /// instrument.
    ///
    /// # Arguments:
    /// - `cmd` - A string slice that will be sent to the instrument.
    fn sendcmd(&mut self, cmd: &str) -> Result<(), InstrumentError> {
        let cmd = format!("{}{}", cmd, self.get_terminator());
        self.write_raw(cmd.as_bytes())
    }

    /// Write a string to the instrument as-is, without appending the terminator.
    ///
    /// Some devices, e.g., the rotation mount in this workspace, frame their input without a
    /// line terminator. Use [`sendcmd`](InstrumentInterface::sendcmd) for terminated commands.
    ///
    /// # Arguments:
    /// - `data` - A string slice that will be sent to the instrument verbatim.
    fn write(&mut self, data: &str) -> Result<(), InstrumentError> {
        self.write_raw(data.as_bytes())
    }

    /// Read from the instrument until the terminator is found and return the trimmed response.
    ///
    /// The response is read character by character until the response string ends with the
    /// terminator. If no terminator is encountered within the timeout, an
    /// [`InstrumentError::Timeout`] is returned. Ports that time out inside their own read
    /// call, as the serial and VISA interfaces do, are reported the same way. If a non-UTF-8
    /// byte is received, an error is printed to stderr and the byte is skipped.
    fn read_until_terminator(&mut self) -> Result<String, InstrumentError> {
        let terminator = self.get_terminator().to_string();
        let timeout = self.get_timeout();
        let mut response = String::new();
        let mut single_buf = [0u8];

        let tic = Instant::now();
        while tic.elapsed() < timeout {
            match self.read_exact(&mut single_buf) {
                Ok(()) => {}
                Err(InstrumentError::Io(err))
                    if matches!(
                        err.kind(),
                        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
                    ) =>
                {
                    return Err(InstrumentError::Timeout(timeout));
                }
                Err(err) => return Err(err),
            }
            if let Ok(val) = str::from_utf8(&single_buf) {
                response.push_str(val);
            } else {
                eprintln!("Received invalid UTF-8 data: {single_buf:?}");
            }
            if response.ends_with(&terminator) {
                return Ok(response.trim().to_string());
            }
        }

        Err(InstrumentError::Timeout(timeout))
    }

    /// Query the instrument with a command and return the response as a String.
    ///
    /// This function uses [`sendcmd`](InstrumentInterface::sendcmd) to send the command and
    /// then reads the response with
    /// [`read_until_terminator`](InstrumentInterface::read_until_terminator). A timeout while
    /// waiting for the response is reported as an [`InstrumentError::TimeoutQuery`] that
    /// carries the command that was sent.
    ///
    /// # Arguments:
    /// - `cmd` - The command to send to the instrument for which we expect a response.
    fn query(&mut self, cmd: &str) -> Result<String, InstrumentError> {
        self.sendcmd(cmd)?;
        match self.read_until_terminator() {
            Err(InstrumentError::Timeout(timeout)) => Err(InstrumentError::TimeoutQuery {
                query: cmd.to_string(),
                timeout,
            }),
            other => other,
        }
    }
}
