use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("numfield");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("--decimal-separator"));
}

#[test]
fn requires_a_form() {
    let mut cmd = cargo::cargo_bin_cmd!("numfield");
    cmd.assert().failure().stderr(contains("--form"));
}
