use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::new(cargo_bin!("paywatch"));
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("balance"))
        .stdout(predicate::str::contains("price"));
}

#[test]
fn test_watch_requires_positional_arguments() {
    let mut cmd = Command::new(cargo_bin!("paywatch"));
    cmd.arg("watch");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_price_rejects_non_numeric_amount() {
    let mut cmd = Command::new(cargo_bin!("paywatch"));
    cmd.args(["price", "btc", "not-a-number"]);

    cmd.assert().failure();
}
