use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

/// Run the binary inside `dir` with no config files or `GEOQR_*` overrides in play.
fn geoqr(dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_geoqr"));
    cmd.args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("GEOQR_LOG_COLOR", "off")
        .env("GEOQR_LOG_LEVEL", "info")
        .env_remove("GEOQR_LOG_FILE")
        .env_remove("GEOQR_QR_ECC")
        .env_remove("GEOQR_QR_BOX_SIZE")
        .env_remove("GEOQR_QR_BORDER");
    cmd.output().expect("run geoqr binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn both_inputs_exit_with_failure_on_stderr() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let output = geoqr(
        tmp.path(),
        &["-c", "1.0,2.0", "-u", "https://example.com/@3.0,4.0"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty(), "{}", stdout(&output));
    assert!(stderr(&output).contains("--coordinates or --url"));
    assert_eq!(std::fs::read_dir(tmp.path()).expect("read dir").count(), 0);
}

#[test]
fn missing_inputs_exit_with_failure_on_stderr() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let output = geoqr(tmp.path(), &["-o", "somewhere.jpg"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty(), "{}", stdout(&output));
    assert!(stderr(&output).contains("--coordinates or --url"));
}

#[test]
fn bad_coordinates_name_the_input() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let output = geoqr(tmp.path(), &["-c", "north,east"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("north,east"));
}

#[test]
fn write_failure_still_exits_zero() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let target = tmp.path().join("nonexistent").join("x.jpg");
    let output = geoqr(
        tmp.path(),
        &["-c", "1.0,2.0", "-o", target.to_str().expect("utf-8 path")],
    );

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Found coordinates: 1.0,2.0"), "{out}");
    assert!(
        out.contains("Encountered an error while attempting to write"),
        "{out}"
    );
    assert!(out.contains("Not saved:"), "{out}");
    assert!(stderr(&output).is_empty(), "{}", stderr(&output));
    assert!(!target.exists());
}

#[test]
fn default_name_lands_in_working_directory() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let output = geoqr(tmp.path(), &["--coordinates", "-33.8688,151.2093"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(tmp.path().join("-33.8688_151.2093.jpg").is_file());
    assert!(stdout(&output).contains("QR successfully created at"));
}

#[test]
fn json_output_is_parseable_and_carries_diagnostics() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let output = geoqr(
        tmp.path(),
        &[
            "--json",
            "-u",
            "https://www.google.com/maps/place/Golden+Gate+Bridge/@37.8199286,-122.4782551,17z",
            "-o",
            tmp.path().to_str().expect("utf-8 path"),
        ],
    );

    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).expect("stdout is only JSON");
    assert_eq!(value["payload"], "geo:37.8199286,-122.4782551");
    assert_eq!(value["written"], true);

    let diagnostics = value["diagnostics"].as_array().expect("diagnostics array");
    assert!(
        diagnostics
            .iter()
            .any(|line| line.as_str().is_some_and(|l| l.contains("Found coordinates")))
    );
    assert!(tmp.path().join("Golden+Gate+Bridge.jpg").is_file());
}
