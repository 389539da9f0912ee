//! End-to-end tests for the countdown binary.
//!
//! Each test feeds a short command script on stdin and checks what the
//! terminal front-end prints.

use assert_cmd::Command;
use predicates::prelude::*;

fn countdown() -> Command {
    let mut cmd = Command::cargo_bin("countdown").unwrap();
    cmd.timeout(std::time::Duration::from_secs(10));
    cmd
}

#[test]
fn help_lists_flags() {
    countdown()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--seconds"))
        .stdout(predicate::str::contains("--no-sound"));
}

#[test]
fn idle_panel_is_printed_on_launch() {
    countdown()
        .arg("--no-sound")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time (seconds): []"))
        .stdout(predicate::str::contains("[Start] (Resume) (Reset)"));
}

#[test]
fn zero_seconds_reports_times_up() {
    countdown()
        .arg("--no-sound")
        .write_stdin("start 0\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time's up!"));
}

#[test]
fn bare_number_starts_the_countdown() {
    countdown()
        .arg("--no-sound")
        .write_stdin("0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time's up!"));
}

#[test]
fn blank_start_counts_as_zero_seconds() {
    countdown()
        .arg("--no-sound")
        .write_stdin("\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time's up!"))
        .stdout(predicate::str::contains("Please enter").not());
}

#[test]
fn invalid_input_shows_validation_message() {
    countdown()
        .arg("--no-sound")
        .write_stdin("start abc\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please enter a valid non-negative number.",
        ))
        .stdout(predicate::str::contains("Time's up!").not());
}

#[test]
fn json_format_prints_views() {
    countdown()
        .args(["--no-sound", "--format", "json"])
        .write_stdin("input 5\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"idle\""))
        .stdout(predicate::str::contains("\"inputText\":\"5\""));
}

#[test]
fn initial_seconds_prefill_the_input() {
    countdown()
        .args(["--no-sound", "--seconds", "42"])
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time (seconds): [42]"));
}

#[test]
fn auto_start_with_zero_finishes() {
    countdown()
        .args(["--no-sound", "--seconds", "0", "--start"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time's up!"));
}

#[test]
fn start_flag_requires_seconds() {
    countdown()
        .args(["--no-sound", "--start"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--start needs an initial value"));
}

#[test]
fn undecodable_sound_file_still_finishes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.mp3");
    std::fs::write(&path, b"definitely not audio").unwrap();

    countdown()
        .arg("--sound")
        .arg(&path)
        .write_stdin("start 0\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time's up!"));
}
