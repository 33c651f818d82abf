//! The loopback module provides an instrument simulator for testing purposes.
//!
//! The [`LoopbackInterfaceString`] allows to test instrument drivers that communicate using
//! strings (which are then encoded as bytes of course) and have a fixed terminator to declare
//! the end of a line. All driver tests in this workspace are written against it.

use std::collections::VecDeque;

use crate::{InstrumentError, InstrumentInterface};

/// A self-incrementing index structure that by default starts at 0 and increments whenever
/// `next` is called.
#[derive(Debug, Default)]
struct IncrIndex {
    index: usize,
}

impl IncrIndex {
    fn next(&mut self) -> usize {
        let current = self.index;
        self.index += 1;
        current
    }
}

/// An interface that allows you to simply write tests for your instrument driver.
///
/// You provide the list of commands that are expected to go from the host to the instrument
/// and the list of responses the instrument will reply with, both in order. Whenever the
/// driver writes something that does not match the next expected command, the interface
/// panics. When the interface is dropped, it panics if any expected traffic is left over.
/// This way, tests can assert the exact command strings and their order without hardware.
///
/// # Example
///
/// Let us build a minimal power-meter-like driver that queries the measured power with
/// `"READ?"` and write a test for it using the [`LoopbackInterfaceString`]. The driver itself
/// would take any interface that implements the [`InstrumentInterface`] trait.
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use opticsrs::{InstrumentInterface, InstrumentError, LoopbackInterfaceString};
///
/// struct MyPowerMeter<T: InstrumentInterface> {
///     interface: Arc<Mutex<T>>,
/// }
///
/// impl<T: InstrumentInterface> MyPowerMeter<T> {
///     fn new(interface: T) -> Self {
///         let interface = Arc::new(Mutex::new(interface));
///         MyPowerMeter { interface }
///     }
///
///     fn get_power(&mut self) -> Result<f64, InstrumentError> {
///         let resp = self.interface.lock().unwrap().query("READ?")?;
///         resp.trim()
///             .parse()
///             .map_err(|_| InstrumentError::ResponseParseError(resp))
///     }
/// }
///
/// let host2inst = vec!["READ?".to_string()];
/// let inst2host = vec!["1.21e-3".to_string()];
///
/// // Create the loopback interface with the expected traffic and the expected terminator.
/// let loopback = LoopbackInterfaceString::new(host2inst, inst2host, "\n");
///
/// let mut inst = MyPowerMeter::new(loopback);
/// assert_eq!(1.21e-3, inst.get_power().unwrap());
/// ```
pub struct LoopbackInterfaceString {
    from_host: Vec<String>,
    from_inst: Vec<String>,
    terminator_exp: String,
    from_host_index: IncrIndex,
    from_inst_index: IncrIndex,
    curr_bytes: VecDeque<u8>,
    terminator: String,
}

impl LoopbackInterfaceString {
    /// Create a new loopback instrument with given commands to and from instrument.
    ///
    /// # Arguments:
    /// - `from_host` - Commands expected from host to instrument, in order.
    /// - `from_inst` - Responses from instrument to host, in order.
    /// - `terminator_exp` - The terminator the driver under test is expected to use. Pass an
    ///   empty string for devices that frame their input without a terminator.
    pub fn new(from_host: Vec<String>, from_inst: Vec<String>, terminator_exp: &str) -> Self {
        LoopbackInterfaceString {
            from_host,
            from_inst,
            terminator_exp: terminator_exp.to_string(),
            from_host_index: IncrIndex::default(),
            from_inst_index: IncrIndex::default(),
            curr_bytes: VecDeque::new(),
            terminator: "\n".to_string(), // default terminator, as interfaces
        }
    }

    /// This command panics if not all commands in the [`LoopbackInterfaceString`] have been
    /// used.
    ///
    /// It is automatically called when the [`LoopbackInterfaceString`] is dropped, but you can
    /// also call it manually to ensure that all commands have been used.
    pub fn finalize(&mut self) {
        let from_host_leftover = self.from_host.get(self.from_host_index.next());
        let from_inst_leftover = self.from_inst.get(self.from_inst_index.next());
        if let Some(fil) = from_host_leftover {
            panic!("Leftover expected commands found from host to instrument: {fil}");
        }
        if let Some(fil) = from_inst_leftover {
            panic!("Leftover expected commands found from instrument to host: {fil}");
        }
    }

    /// Get the next command from host to instrument, or panic.
    fn get_next_from_host(&mut self) -> &str {
        self.from_host
            .get(self.from_host_index.next())
            .expect("No more commands were expected from host to instrument.")
    }

    /// Get the next response from instrument to host as a string including the terminator.
    fn get_next_from_inst_with_terminator(&mut self) -> String {
        let cmd = self
            .from_inst
            .get(self.from_inst_index.next())
            .expect("No more responses were expected from instrument to host.");
        format!("{cmd}{}", self.terminator_exp)
    }

    /// Function to read exactly one byte from the next response from the instrument.
    ///
    /// This just panics if there are no more responses. If there are no more responses but one
    /// is required, the panic is justified as this is a test interface.
    fn read_one_byte(&mut self) -> u8 {
        match self.curr_bytes.pop_front() {
            Some(byte) => byte,
            None => {
                let next_cmd = self.get_next_from_inst_with_terminator();
                self.curr_bytes = next_cmd.as_bytes().iter().copied().collect();
                self.read_one_byte()
            }
        }
    }
}

impl InstrumentInterface for LoopbackInterfaceString {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        for byte in buf.iter_mut() {
            *byte = self.read_one_byte();
        }
        Ok(())
    }

    fn get_terminator(&self) -> &str {
        self.terminator.as_str()
    }

    fn set_terminator(&mut self, terminator: &str) {
        self.terminator = terminator.to_string();
    }

    fn write_raw(&mut self, cmd: &[u8]) -> Result<(), InstrumentError> {
        let exp_cmd = self.get_next_from_host().to_string();
        let exp = format!("{exp_cmd}{}", self.terminator_exp);
        assert_eq!(
            exp.as_bytes(),
            cmd,
            "Expected write '{0}', got '{1:?}'",
            exp,
            str::from_utf8(cmd)
        );
        Ok(())
    }
}

impl Drop for LoopbackInterfaceString {
    fn drop(&mut self) {
        self.finalize();
    }
}
