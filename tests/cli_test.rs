use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_default_flow_captures() {
    let mut cmd = Command::new(cargo_bin!("dccflow"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("quote: SUCCESS AVAILABLE"))
        .stdout(predicate::str::contains("charge: SUCCESS CAPTURED"));
}

#[test]
fn test_reverse_flag_reverses_the_charge() {
    let mut cmd = Command::new(cargo_bin!("dccflow"));
    cmd.arg("--reverse");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("charge: SUCCESS CAPTURED"))
        .stdout(predicate::str::contains("reverse: SUCCESS REVERSED"));
}

#[test]
fn test_tokenized_flow_captures() {
    let mut cmd = Command::new(cargo_bin!("dccflow"));
    cmd.arg("--tokenize");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tokenize: SUCCESS ACTIVE"))
        .stdout(predicate::str::contains("charge: SUCCESS CAPTURED"));
}

#[test]
fn test_unknown_currency_quotes_unavailable() {
    let mut cmd = Command::new(cargo_bin!("dccflow"));
    cmd.args(["15.11", "JPY"]);

    // no rate on offer; the binary stops before charging with a quote error
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("quote: SUCCESS NOT_AVAILABLE"));
}

#[test]
fn test_invalid_currency_is_rejected_client_side() {
    let mut cmd = Command::new(cargo_bin!("dccflow"));
    cmd.args(["15.11", "euros"]);

    cmd.assert().failure();
}
