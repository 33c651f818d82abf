//! Tests for the [`Instrument`] interface itself.
//!
//! Note that most of the functionality of the [`InstrumentInterface`] trait is exercised in
//! the [`opticsrs::LoopbackInterfaceString`] tests and in the driver crates.

use std::{
    collections::VecDeque,
    io::{Read, Write},
    time::Duration,
};

use rstest::*;

use opticsrs::{Instrument, InstrumentError, InstrumentInterface};

/// A port whose reads time out on their own, as a silent instrument on a real bus behaves.
struct SilentPort;

impl Read for SilentPort {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "Operation timed out",
        ))
    }
}

impl Write for SilentPort {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Set up an empty instrument with default 3 second timeout.
#[fixture]
fn empt_inst() -> Instrument<VecDeque<u8>> {
    Instrument::new(VecDeque::new(), Duration::from_secs(3))
}

/// Set up an instrument with a response that carries no terminator and no timeout duration.
#[fixture]
fn no_term_inst() -> Instrument<VecDeque<u8>> {
    Instrument::new(
        VecDeque::from(vec![b'r', b'e', b's', b'p']),
        Duration::from_secs(0),
    )
}

#[rstest]
fn test_instrument_terminator(mut empt_inst: Instrument<VecDeque<u8>>) {
    assert_eq!(empt_inst.get_terminator(), "\n");

    empt_inst.set_terminator("\r\n");
    assert_eq!(empt_inst.get_terminator(), "\r\n");
}

#[rstest]
fn test_instrument_timeout(empt_inst: Instrument<VecDeque<u8>>) {
    assert_eq!(empt_inst.get_timeout(), Duration::from_secs(3));
}

#[rstest]
fn test_instrument_write_read(mut empt_inst: Instrument<VecDeque<u8>>) {
    let data = b"Hello, Instrument!";
    empt_inst.write_raw(data).unwrap();

    let mut buf = vec![0; data.len()];
    empt_inst.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, data);
}

#[rstest]
fn test_instrument_read_until_terminator_timeout(mut no_term_inst: Instrument<VecDeque<u8>>) {
    let timeout_exp = Duration::from_secs(0);

    match no_term_inst.read_until_terminator() {
        Err(InstrumentError::Timeout(timeout)) => {
            assert_eq!(timeout_exp, timeout);
        }
        _ => panic!("Expected timeout error, but got a different result."),
    }
}

#[rstest]
fn test_instrument_query_timeout(mut no_term_inst: Instrument<VecDeque<u8>>) {
    let timeout_exp = Duration::from_secs(0);
    let query_exp = "QUERY";

    match no_term_inst.query(query_exp) {
        Err(InstrumentError::TimeoutQuery { query, timeout }) => {
            assert_eq!(query_exp, query);
            assert_eq!(timeout_exp, timeout);
        }
        _ => panic!("Expected timeout error, but got a different result."),
    }
}

/// Set up an instrument over a port whose reads time out, with the default 3 second timeout.
#[fixture]
fn silent_inst() -> Instrument<SilentPort> {
    Instrument::new(SilentPort, Duration::from_secs(3))
}

/// A port-level read timeout surfaces as `Timeout`, not as an opaque I/O error.
#[rstest]
fn test_instrument_read_until_terminator_port_timeout(mut silent_inst: Instrument<SilentPort>) {
    match silent_inst.read_until_terminator() {
        Err(InstrumentError::Timeout(timeout)) => {
            assert_eq!(timeout, Duration::from_secs(3));
        }
        _ => panic!("Expected timeout error, but got a different result."),
    }
}

/// A port-level read timeout during a query surfaces as `TimeoutQuery` with the command.
#[rstest]
fn test_instrument_query_port_timeout(mut silent_inst: Instrument<SilentPort>) {
    match silent_inst.query("READ?") {
        Err(InstrumentError::TimeoutQuery { query, timeout }) => {
            assert_eq!(query, "READ?");
            assert_eq!(timeout, Duration::from_secs(3));
        }
        _ => panic!("Expected timeout error, but got a different result."),
    }
}

#[rstest]
fn test_instrument_query_response(mut empt_inst: Instrument<VecDeque<u8>>) {
    // The VecDeque echoes everything written to it, terminator included.
    let resp = empt_inst.query("READ?").unwrap();
    assert_eq!(resp, "READ?");
}
