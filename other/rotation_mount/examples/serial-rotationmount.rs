use rotation_mount::{RotationMount, SerialInterfaceRotationMount};

fn main() {
    let port = "/dev/ttyUSB0";

    // Get our serial instrument interface
    let serial_inst =
        SerialInterfaceRotationMount::simple(port).expect("Failed to open serial port");

    // Now we can open the rotation mount with the serial interface.
    let mut inst = RotationMount::new(serial_inst);

    // Rotate the mounted component by 90 degrees, then back.
    inst.rotate(90).unwrap();
    inst.rotate(-90).unwrap();
}
