use measurements::Length;
use santec_tsl710::{LaserState, PowerUnit, Tsl710, VisaInterfaceTsl710};

fn main() {
    let address = "GPIB0::1::INSTR";

    // Get our VISA instrument interface
    let visa_inst = VisaInterfaceTsl710::simple(address).expect("Failed to open VISA resource");

    // Now we can open the laser with the VISA interface.
    let mut inst = Tsl710::new(visa_inst);
    println!("Instrument ID: {}", inst.get_name().unwrap());

    // Tune to 1550 nm at 0 dBm and turn the emission on.
    inst.set_wavelength(Length::from_nanometers(1550.0)).unwrap();
    inst.set_power(PowerUnit::Dbm, 0.0).unwrap();
    inst.set_laser(LaserState::On).unwrap();

    // Read back the monitored power.
    println!("Monitored power: {}", inst.get_power().unwrap());

    inst.set_laser(LaserState::Off).unwrap();
}
