use assert_cmd::cargo::{self};
use predicates::str::{contains, diff};

const INVOICE: &str = r#"{
    "fields": [
        {"name": "price", "text": "19.999", "limitationType": "currency"},
        {"name": "share", "text": "150", "limitationType": "percents"},
        {"name": "debt", "text": "-2.7", "integerOnly": true}
    ]
}"#;

#[test]
fn normalizes_inline_form() {
    let mut cmd = cargo::cargo_bin_cmd!("numfield");
    cmd.env("LC_ALL", "C")
        .args(["--no-ui", "--no-pretty", "-f", INVOICE])
        .assert()
        .success()
        .stdout(diff("{\"price\":20,\"share\":100,\"debt\":-2}\n"));
}

#[test]
fn reads_form_from_stdin_with_comma_locale() {
    let mut cmd = cargo::cargo_bin_cmd!("numfield");
    cmd.args(["--no-ui", "--no-pretty", "--decimal-separator", ",", "-f", "-"])
        .write_stdin(r#"{"fields": [{"name": "rate", "text": "2,345", "precision": 2}]}"#)
        .assert()
        .success()
        .stdout(diff("{\"rate\":2.35}\n"));
}

#[test]
fn rejects_duplicate_field_names() {
    let mut cmd = cargo::cargo_bin_cmd!("numfield");
    cmd.env("LC_ALL", "C")
        .args(["--no-ui", "-f", r#"{"fields": [{"name": "a"}, {"name": "a"}]}"#])
        .assert()
        .failure()
        .stderr(contains("more than once"));
}

#[test]
fn host_locale_sets_the_decimal_separator() {
    let mut cmd = cargo::cargo_bin_cmd!("numfield");
    cmd.env("LC_ALL", "de_DE.UTF-8")
        .args([
            "--no-ui",
            "--no-pretty",
            "-f",
            r#"{"fields": [{"name": "rate", "text": "2,5"}]}"#,
        ])
        .assert()
        .success()
        .stdout(diff("{\"rate\":2.5}\n"));
}

#[test]
fn document_separator_wins_over_host_locale() {
    let mut cmd = cargo::cargo_bin_cmd!("numfield");
    cmd.env("LC_ALL", "de_DE.UTF-8")
        .args([
            "--no-ui",
            "--no-pretty",
            "-f",
            r#"{"decimalSeparator": ".", "fields": [{"name": "rate", "text": "2.5"}]}"#,
        ])
        .assert()
        .success()
        .stdout(diff("{\"rate\":2.5}\n"));
}
