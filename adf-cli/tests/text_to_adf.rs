use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

mod common;
use common::fixture_path;

#[test]
fn text_to_adf_from_stdin() {
    let mut cmd = cargo_bin_cmd!("adf");
    cmd.arg("text-to-adf").write_stdin("ℹ️ Title\nBody\n");

    let expected = concat!(
        r#"{"type":"doc","version":1,"content":[{"type":"panel","attrs":{"panelType":"info"},"#,
        r#""content":[{"type":"paragraph","content":[{"type":"text","marks":[{"type":"strong"}],"text":"Title"}]},"#,
        r#"{"type":"paragraph","content":[{"type":"text","text":"Body"}]}]}]}"#,
        "\n"
    );
    cmd.assert().success().stdout(expected);
}

#[test]
fn text_to_adf_pretty_from_file() {
    let mut cmd = cargo_bin_cmd!("adf");
    cmd.arg("text-to-adf")
        .arg(fixture_path("new-ticket.txt"))
        .arg("--pretty");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("{\n  \"type\": \"doc\""))
        .stdout(predicate::str::contains("\"panelType\": \"warning\""))
        .stdout(predicate::str::contains("\"language\": \"sh\""));
}

#[test]
fn text_to_adf_pretty_from_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("adf.toml");
    fs::write(&config_path, "[convert]\npretty_json = true\n").unwrap();

    let mut cmd = cargo_bin_cmd!("adf");
    cmd.arg("text-to-adf")
        .arg("--config")
        .arg(config_path.as_os_str())
        .write_stdin("hello");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\n  \"version\": 1,"));
}

#[test]
fn empty_input_gives_empty_document() {
    let mut cmd = cargo_bin_cmd!("adf");
    cmd.arg("text-to-adf").write_stdin("");

    cmd.assert()
        .success()
        .stdout("{\"type\":\"doc\",\"version\":1,\"content\":[]}\n");
}
