use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_stops-to-json");
    let mut cmd = Command::new(exe);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_stops(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("stops.txt");
    std::fs::write(&path, contents).expect("write stops");
    path
}

fn parse_stdout(output: &Output) -> Value {
    let text = std::str::from_utf8(&output.stdout).expect("utf8");
    assert!(text.ends_with("}\n"), "missing trailing newline: {text:?}");
    serde_json::from_str(text).expect("valid json")
}

#[test]
fn station_and_platform_gives_one_entry() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_stops(
        temp.path(),
        "stop_name,stop_lat,stop_lon,location_type\n\
         Grand Central,40.7527,-73.9772,1\n\
         Grand Central Track 1,40.7526,-73.9771,0\n",
    );

    let output = cmd().arg(&path).output().expect("run");
    assert!(output.status.success());
    assert_eq!(
        parse_stdout(&output),
        json!({ "coordinates": { "Grand Central": { "x": -73.9772, "y": 40.7527 } } })
    );
}

#[test]
fn defaults_to_stops_txt_in_working_directory() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_stops(
        temp.path(),
        "location_type,stop_name,stop_lat,stop_lon\n1,  Sol  ,40.4169,-3.7035\n",
    );

    let output = cmd().current_dir(temp.path()).output().expect("run");
    assert!(output.status.success());
    assert_eq!(
        parse_stdout(&output),
        json!({ "coordinates": { "Sol": { "x": -3.7035, "y": 40.4169 } } })
    );
}

#[test]
fn unicode_names_are_written_literally() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_stops(
        temp.path(),
        "stop_name,stop_lat,stop_lon,location_type\nPlaza de España,40.4233,-3.7122,1\n",
    );

    let output = cmd().arg(&path).output().expect("run");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("\"Plaza de España\""));
    assert!(text.starts_with("{\n  \"coordinates\": {\n    \""));
}

#[test]
fn header_only_gives_empty_mapping() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_stops(temp.path(), "stop_name,stop_lat,stop_lon,location_type\n");

    let output = cmd().arg(&path).output().expect("run");
    assert!(output.status.success());
    assert_eq!(parse_stdout(&output), json!({ "coordinates": {} }));
}

#[test]
fn empty_file_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_stops(temp.path(), "");

    let output = cmd().arg(&path).output().expect("run");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_fails_with_diagnostic() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = cmd()
        .arg(temp.path().join("missing.txt"))
        .output()
        .expect("run");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.txt"), "stderr: {stderr}");
}

#[test]
fn non_numeric_latitude_fails_without_output() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_stops(
        temp.path(),
        "stop_name,stop_lat,stop_lon,location_type\n\
         Sol,40.4169,-3.7035,1\n\
         Opera,abc,-3.7099,1\n",
    );

    let output = cmd().arg(&path).output().expect("run");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stop_lat"), "stderr: {stderr}");
}
