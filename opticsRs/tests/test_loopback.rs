//! Test cases for the [`LoopbackInterfaceString`].

use rstest::*;

use opticsrs::{InstrumentInterface, LoopbackInterfaceString};

/// Create a new `LoopbackInterfaceString` from string slices with a `"\n"` terminator.
fn crt_lbk(from_host: Vec<&str>, from_inst: Vec<&str>) -> LoopbackInterfaceString {
    let h2i: Vec<String> = from_host.iter().map(|s| s.to_string()).collect();
    let i2h: Vec<String> = from_inst.iter().map(|s| s.to_string()).collect();
    LoopbackInterfaceString::new(h2i, i2h, "\n")
}

/// Create a loopback interface that contains no commands.
#[fixture]
fn emp_lbk() -> LoopbackInterfaceString {
    crt_lbk(vec![], vec![])
}

/// Ensure `finalize` method passes if an empty loopback interface is used.
#[rstest]
fn finalize_test(mut emp_lbk: LoopbackInterfaceString) {
    emp_lbk.finalize();
}

/// Ensure `finalize` method panics if commands are left in the loopback interface.
#[rstest]
#[case(vec!["cmd"], vec![])]
#[case(vec![], vec!["resp"])]
#[case(vec!["cmd"], vec!["resp"])]
#[should_panic]
fn finalize_test_panic(#[case] from_host: Vec<&str>, #[case] from_inst: Vec<&str>) {
    let mut lbk = crt_lbk(from_host, from_inst);
    lbk.finalize();
}

#[rstest]
fn sendcmd() {
    let mut lbk = crt_lbk(vec!["cmd1", "cmd2"], vec![]);
    lbk.sendcmd("cmd1").unwrap();
    lbk.sendcmd("cmd2").unwrap();
    lbk.finalize();
}

#[rstest]
#[should_panic]
fn sendcmd_mismatch() {
    let mut lbk = crt_lbk(vec!["cmd1"], vec![]);
    let _ = lbk.sendcmd("cmd3");
}

#[rstest]
fn query() {
    let mut lbk = crt_lbk(vec!["cmd1", "cmd2"], vec!["resp1", "resp2"]);
    let resp1 = lbk.query("cmd1").unwrap();
    assert_eq!(resp1, "resp1");
    let resp2 = lbk.query("cmd2").unwrap();
    assert_eq!(resp2, "resp2");
    lbk.finalize();
}

/// An empty expected terminator checks unterminated writes, as the rotation mount sends them.
#[rstest]
fn write_without_terminator() {
    let mut lbk = LoopbackInterfaceString::new(vec!["90".to_string()], vec![], "");
    lbk.write("90").unwrap();
    lbk.finalize();
}

/// A mismatching raw write reports a plain write mismatch, not a sendcmd one.
#[rstest]
#[should_panic(expected = "Expected write '90'")]
fn write_mismatch() {
    let mut lbk = LoopbackInterfaceString::new(vec!["90".to_string()], vec![], "");
    let _ = lbk.write("91");
}

#[rstest]
fn terminator_default(emp_lbk: LoopbackInterfaceString) {
    assert_eq!(emp_lbk.get_terminator(), "\n");
}

#[rstest]
fn terminator_set(mut emp_lbk: LoopbackInterfaceString) {
    emp_lbk.set_terminator("\r\n");
    assert_eq!(emp_lbk.get_terminator(), "\r\n");
}
