//! Process-level checks for the `scribe` binary
//!
//! Commands that fail must exit nonzero so shell scripts can react; the
//! backend here is an unroutable address, so every sync attempt fails fast.

use std::io::Write;
use std::process::Command;

fn unreachable_config() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    write!(
        file,
        "api:\n  base_url: \"http://127.0.0.1:9\"\n  request_timeout_secs: 2\n"
    )
    .expect("write config");
    file
}

fn scribe() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scribe"))
}

#[test]
fn test_failed_command_exits_nonzero() {
    let config = unreachable_config();
    let output = scribe()
        .args(["--json", "--config"])
        .arg(config.path())
        .args(["approve", "1"])
        .output()
        .expect("run scribe");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"success\": false") || stderr.contains("\"success\":false"));
}

#[test]
fn test_failed_status_exits_nonzero() {
    let config = unreachable_config();
    let output = scribe()
        .arg("--config")
        .arg(config.path())
        .arg("status")
        .output()
        .expect("run scribe");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let output = scribe().arg("--help").output().expect("run scribe");
    assert!(output.status.success());
}
