//! A rust driver for a stepper-motor rotation mount for optical components.
//!
//! The mount rotates optical components such as mirrors, beamsplitters, or wave plates by a
//! given number of degrees. Its controller reads the rotation amount as plain decimal text
//! from the serial line.
//!
//! # Example
//!
//! This example shows the usage via the serial interface.
//! ```no_run
//! use rotation_mount::{RotationMount, SerialInterfaceRotationMount};
//!
//! // The port where the rotation mount is connected to
//! let port = "/dev/ttyUSB0";
//!
//! // Get the serial interface for the rotation mount and open it. This interface already
//! // sets the correct baud rate, parity, stop bits, and data bits for the controller.
//! let serial_inst = SerialInterfaceRotationMount::simple(port).expect("Failed to open serial port");
//! let mut inst = RotationMount::new(serial_inst);
//!
//! // Rotate the mounted component by 90 degrees.
//! inst.rotate(90).unwrap();
//! ```

#![deny(warnings, missing_docs)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use opticsrs::{Instrument, InstrumentError, InstrumentInterface, SerialInterface};

use serialport::SerialPort;

/// A SerialInterface for the rotation mount.
///
/// Builds an OpticsRs SerialInterface with the correct baud rate, parity, stop bits, and data
/// bits for communication with the rotation mount controller.
#[derive(Debug)]
pub struct SerialInterfaceRotationMount {}

impl SerialInterfaceRotationMount {
    /// Create an Instrument interface with a simple serial port configuration.
    ///
    /// This is analog to the `simple` method of the `SerialInterface` struct in `OpticsRs`,
    /// however, it sets the line parameters the rotation mount controller requires: 115200
    /// baud, 8 data bits, no parity, 1 stop bit. The default timeout is set to 3 seconds.
    ///
    /// # Arguments:
    /// - `port` - The name of the serial port, e.g., `"/dev/ttyUSB0"` or `"COM3"`.
    pub fn simple(port: &str) -> Result<Instrument<Box<dyn SerialPort>>, InstrumentError> {
        let timeout = Duration::from_secs(3);
        let port = serialport::new(port, 115200)
            .timeout(timeout)
            .data_bits(serialport::DataBits::Eight)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One);
        SerialInterface::full(port)
    }
}

/// A rust driver for the rotation mount.
///
/// See the top-level documentation for an example on how to use this driver.
pub struct RotationMount<T: InstrumentInterface> {
    interface: Arc<Mutex<T>>,
}

impl<T: InstrumentInterface> RotationMount<T> {
    /// Create a new rotation mount instance with the given instrument interface.
    ///
    /// # Arguments
    /// - `interface` - An instrument interface that implements the [`InstrumentInterface`]
    ///   trait.
    pub fn new(interface: T) -> Self {
        RotationMount {
            interface: Arc::new(Mutex::new(interface)),
        }
    }

    /// Rotate the mounted component by the given number of degrees.
    ///
    /// The rotation amount is sent to the controller as plain decimal text. Negative values
    /// rotate in the opposite direction. The controller protocol defines no line terminator
    /// and sends no acknowledgment, so nothing is read back; the write is framed by the
    /// controller's own parsing.
    ///
    /// # Arguments
    /// - `degrees` - The rotation amount in whole degrees.
    pub fn rotate(&mut self, degrees: i32) -> Result<(), InstrumentError> {
        let mut intf = self.interface.lock().expect("Mutex should not be poisoned");
        intf.write(&degrees.to_string())
    }
}

impl<T: InstrumentInterface> Clone for RotationMount<T> {
    fn clone(&self) -> Self {
        Self {
            interface: self.interface.clone(),
        }
    }
}
