use measurements::Length;
use thorlabs_pm100::{Pm100, VisaInterfacePm100};

fn main() {
    let address = "USB0::0x1313::0x807B::201103226::INSTR";

    // Get our VISA instrument interface
    let visa_inst = VisaInterfacePm100::simple(address).expect("Failed to open VISA resource");

    // Now we can open the power meter with the VISA interface.
    let mut inst = Pm100::new(visa_inst);
    println!("Instrument ID: {}", inst.get_name().unwrap());

    // Correct for a 1550 nm beam and read the power.
    inst.set_wavelength(Length::from_nanometers(1550.0)).unwrap();
    println!("Measured power: {:?}", inst.get_power());
}
