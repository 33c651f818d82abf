use measurements::Length;
use opticsrs::{InstrumentError, LoopbackInterfaceString};
use rstest::*;
use thorlabs_pm100::Pm100;

/// Create a new loopback instrument from the given input string slices.
fn crt_inst(host2inst: Vec<&str>, inst2host: Vec<&str>) -> Pm100<LoopbackInterfaceString> {
    let term = "\n";
    let h2i: Vec<String> = host2inst.iter().map(|s| s.to_string()).collect();
    let i2h: Vec<String> = inst2host.iter().map(|s| s.to_string()).collect();
    let interface = LoopbackInterfaceString::new(h2i, i2h, term);
    Pm100::new(interface)
}

#[rstest]
fn test_get_name() {
    let mut inst = crt_inst(
        vec!["*IDN?"],
        vec!["Thorlabs,PM100USB,201103226,1.5.0"],
    );

    assert_eq!(inst.get_name().unwrap(), "Thorlabs,PM100USB,201103226,1.5.0");
}

#[rstest]
fn test_get_power() {
    let mut inst = crt_inst(vec!["READ?"], vec!["1.21e-3"]);

    let power = inst.get_power().unwrap();
    assert_eq!(power.as_watts(), 1.21e-3);
}

#[rstest]
fn test_get_power_parse_error() {
    let mut inst = crt_inst(vec!["READ?"], vec!["garbage"]);

    match inst.get_power() {
        Err(InstrumentError::ResponseParseError(resp)) => assert_eq!(resp, "garbage"),
        _ => panic!("Expected ResponseParseError"),
    }
}

#[rstest]
fn test_wavelength() {
    let mut inst = crt_inst(
        vec!["SENS:CORR:WAV 1550", "SENS:CORR:WAV?"],
        vec!["1550"],
    );

    inst.set_wavelength(Length::from_nanometers(1550.0)).unwrap();
    let wavelength = inst.get_wavelength().unwrap();
    assert_eq!(wavelength.as_nanometers(), 1550.0);
}

#[rstest]
fn test_beam_diameter() {
    let mut inst = crt_inst(
        vec!["SENS:CORR:BEAM 5", "SENS:CORR:BEAM?"],
        vec!["5"],
    );

    inst.set_beam_diameter(Length::from_millimeters(5.0)).unwrap();
    let diameter = inst.get_beam_diameter().unwrap();
    assert_eq!(diameter.as_millimeters(), 5.0);
}

#[rstest]
fn test_get_current() {
    let mut inst = crt_inst(vec!["MEAS:CURR?"], vec!["1.2e-4"]);

    let current = inst.get_current().unwrap();
    assert_eq!(current.as_amperes(), 1.2e-4);
}

#[rstest]
fn test_set_averaging_rate() {
    let mut inst = crt_inst(vec!["SENS:AVER:10"], vec![]);

    inst.set_averaging_rate(10).unwrap();
}
