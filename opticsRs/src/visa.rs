//! This module provides constructors for instruments controlled via a VISA session.
//!
//! It builds a blocking [`Instrument`] on top of the [`visa_rs`] crate, which requires a VISA
//! library (e.g., NI-VISA) to be installed on the system. Instruments are addressed by their
//! VISA resource string, e.g., `"USB0::0x1313::0x807B::201103226::INSTR"` or
//! `"GPIB0::1::INSTR"`.

use std::ffi::CString;
use std::io::{Read, Write};
use std::time::Duration;

use visa_rs::enums::attribute::{AttrTmoValue, Attribute};
use visa_rs::prelude::*;

use crate::{Instrument, InstrumentError};

/// A VISA session together with the resource manager that opened it.
///
/// The resource manager closes all sessions opened through it when it is dropped, so it has to
/// stay alive for as long as the session is in use. Reads and writes are forwarded to the
/// session.
pub struct VisaPort {
    session: visa_rs::Instrument,
    _rm: DefaultRM,
}

impl Read for VisaPort {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.session.read(buf)
    }
}

impl Write for VisaPort {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.session.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.session.flush()
    }
}

/// Constructors for a blocking VISA [`Instrument`] using the [`visa_rs`] crate.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use opticsrs::VisaInterface;
///
/// let address = "USB0::0x1313::0x807B::201103226::INSTR";
/// let interface = VisaInterface::simple(address, Duration::from_secs(3)).unwrap();
/// ```
#[derive(Debug)]
pub struct VisaInterface {}

impl VisaInterface {
    /// Create an [`Instrument`] for the resource with the given VISA address.
    ///
    /// The default resource manager is opened and the address is looked up in the enumerated
    /// resource list. If the address is not present, e.g., because the instrument is not
    /// connected or powered off, this fails with [`InstrumentError::ResourceNotFound`] and
    /// nothing is opened.
    ///
    /// # Arguments:
    /// - `address` - The VISA resource string of the instrument.
    /// - `timeout` - Used both as the open timeout and as the I/O timeout of the session.
    ///   The latter is written to the session's `TMO_VALUE` attribute, since opening alone
    ///   would leave the VISA default of 2 seconds in place.
    pub fn simple(
        address: &str,
        timeout: Duration,
    ) -> Result<Instrument<VisaPort>, InstrumentError> {
        let rm = DefaultRM::new()?;
        let expr = CString::new(address)
            .map_err(|_| {
                InstrumentError::InvalidArgument(format!(
                    "VISA address {address} must not contain a NUL byte"
                ))
            })?
            .into();
        let res = rm
            .find_res(&expr)
            .map_err(|_| InstrumentError::ResourceNotFound {
                address: address.to_string(),
            })?;
        let session = rm.open(&res, AccessMode::NO_LOCK, timeout)?;
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let tmo = AttrTmoValue::new_checked(millis).ok_or_else(|| {
            InstrumentError::InvalidArgument(format!(
                "Timeout {timeout:?} is not a valid VISA timeout"
            ))
        })?;
        session.set_attr(Attribute::from(tmo))?;
        Ok(Instrument::new(VisaPort { session, _rm: rm }, timeout))
    }
}
