//! Tests for the default implementation of the [`InstrumentInterface`] trait.

use std::{collections::VecDeque, io::Read, io::Write, time::Duration};

use rstest::*;

use opticsrs::{InstrumentError, InstrumentInterface};

struct TestInstrument<P: Read + Write> {
    port: P,
}

impl<P: Read + Write> InstrumentInterface for TestInstrument<P> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), InstrumentError> {
        self.port.read_exact(buf)?;
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<(), InstrumentError> {
        self.port.write_all(data)?;
        Ok(())
    }
}

#[fixture]
fn inst() -> TestInstrument<VecDeque<u8>> {
    TestInstrument {
        port: VecDeque::new(),
    }
}

#[rstest]
fn test_default_get_terminator(inst: TestInstrument<VecDeque<u8>>) {
    assert_eq!(inst.get_terminator(), "\n");
}

#[rstest]
fn test_default_get_timeout(inst: TestInstrument<VecDeque<u8>>) {
    assert_eq!(inst.get_timeout(), Duration::from_secs(3));
}

#[rstest]
fn test_default_sendcmd_appends_terminator(mut inst: TestInstrument<VecDeque<u8>>) {
    inst.sendcmd("CMD").unwrap();

    let mut buf = vec![0; 4];
    inst.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"CMD\n");
}

#[rstest]
fn test_default_write_is_raw(mut inst: TestInstrument<VecDeque<u8>>) {
    inst.write("90").unwrap();

    let mut buf = vec![0; 2];
    inst.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"90");
}

#[rstest]
fn test_default_read_until_terminator_trims(mut inst: TestInstrument<VecDeque<u8>>) {
    inst.write("1.21e-3\n").unwrap();

    assert_eq!(inst.read_until_terminator().unwrap(), "1.21e-3");
}
