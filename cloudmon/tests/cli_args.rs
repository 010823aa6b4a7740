//! CLI tests for cloudmon: help, configuration resolution and exit codes.
//! Every run uses --dry-run or fails before the terminal is touched.

use assert_cmd::Command;
use std::fs;

fn cloudmon(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("cloudmon").expect("binary built");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("CLOUDMON_API_URL")
        .env_remove("CLOUDMON_LOG_FILE");
    cmd
}

fn stdout_of(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr_of(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn help_mentions_flags_and_env() {
    let td = tempfile::tempdir().unwrap();
    let out = cloudmon(td.path()).arg("--help").assert().success();
    let text = stdout_of(out.get_output());
    for flag in ["--profile", "-P", "--interval", "--timeout", "--dry-run", "CLOUDMON_API_URL"] {
        assert!(text.contains(flag), "help text missing {flag}\n{text}");
    }
}

#[test]
fn missing_url_is_fatal() {
    let td = tempfile::tempdir().unwrap();
    let out = cloudmon(td.path()).arg("--dry-run").assert().failure();
    let err = stderr_of(out.get_output());
    assert!(err.contains("no metrics service URL configured"), "{err}");
}

#[test]
fn env_url_is_used() {
    let td = tempfile::tempdir().unwrap();
    let out = cloudmon(td.path())
        .env("CLOUDMON_API_URL", "http://env-host:5000")
        .arg("--dry-run")
        .assert()
        .success();
    let text = stdout_of(out.get_output());
    assert!(text.contains("url: http://env-host:5000/"), "{text}");
    assert!(text.contains("interval: 5s") && text.contains("timeout: 5s"), "{text}");
}

#[test]
fn profile_created_then_loaded() {
    let td = tempfile::tempdir().unwrap();
    cloudmon(td.path())
        .args(["--profile", "lab", "-i", "10", "http://lab:5000", "--dry-run"])
        .assert()
        .success();
    let path = td.path().join("cloudmon").join("profiles.json");
    let data = fs::read_to_string(&path).expect("profiles.json created");
    assert!(data.contains("lab") && data.contains("http://lab:5000"), "{data}");

    let out = cloudmon(td.path())
        .args(["-P", "lab", "--dry-run"])
        .assert()
        .success();
    let text = stdout_of(out.get_output());
    assert!(text.contains("url: http://lab:5000/"), "{text}");
    assert!(text.contains("interval: 10s"), "{text}");
}

#[test]
fn profile_overwritten_only_with_save() {
    let td = tempfile::tempdir().unwrap();
    let path = td.path().join("cloudmon").join("profiles.json");
    cloudmon(td.path())
        .args(["--profile", "prod", "http://one", "--dry-run"])
        .assert()
        .success();
    let first = fs::read_to_string(&path).unwrap();

    cloudmon(td.path())
        .args(["--profile", "prod", "http://two", "--dry-run"])
        .assert()
        .success();
    assert_eq!(first, fs::read_to_string(&path).unwrap());

    cloudmon(td.path())
        .args(["--profile", "prod", "--save", "http://two", "--dry-run"])
        .assert()
        .success();
    let third = fs::read_to_string(&path).unwrap();
    assert!(third.contains("http://two"), "{third}");
}

#[test]
fn bad_flag_values_exit_with_usage_error() {
    let td = tempfile::tempdir().unwrap();
    cloudmon(td.path())
        .args(["--interval", "soon", "http://h"])
        .assert()
        .code(2);
    cloudmon(td.path())
        .args(["--interval", "0", "http://h", "--dry-run"])
        .assert()
        .code(2);
    cloudmon(td.path())
        .args(["--timeout=0", "http://h", "--dry-run"])
        .assert()
        .code(2);
}

#[test]
fn non_http_url_is_rejected() {
    let td = tempfile::tempdir().unwrap();
    let out = cloudmon(td.path())
        .args(["ws://h:3000/ws", "--dry-run"])
        .assert()
        .failure();
    let err = stderr_of(out.get_output());
    assert!(err.contains("invalid metrics service URL"), "{err}");
}
