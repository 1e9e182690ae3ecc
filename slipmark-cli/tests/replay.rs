use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

#[test]
fn replay_on_empty_document() {
    let mut cmd = cargo_bin_cmd!("slipmark");
    cmd.arg("replay")
        .arg("--keys")
        .arg("# Title{enter}so **bold**");
    cmd.assert()
        .success()
        .stdout("\n# Title\nso **bold**\n");
}

#[test]
fn replay_backspace_reverts_prefix() {
    let mut cmd = cargo_bin_cmd!("slipmark");
    cmd.arg("replay").arg("--keys").arg("> {backspace}");
    cmd.assert().success().stdout(">\n");
}

#[test]
fn replay_starts_from_a_stored_document() {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("notes.json");
    let mut cmd = cargo_bin_cmd!("slipmark");
    cmd.arg("replay")
        .arg(&fixture)
        .arg("--keys")
        .arg("`x`")
        .arg("--to")
        .arg("treeviz");
    cmd.assert().success().stdout(
        predicate::str::contains("code-container").and(predicate::str::contains("⊕ link")),
    );
}

#[test]
fn replay_reports_bad_scripts() {
    let mut cmd = cargo_bin_cmd!("slipmark");
    cmd.arg("replay").arg("--keys").arg("{enter");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Replay error"));
}
