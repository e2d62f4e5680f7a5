//! End-to-end tests for the countdown clock CLI.
//!
//! These tests run the compiled binary and cover the paths that end before
//! the clock starts ticking:
//! - Help, version and completions
//! - Duration parsing errors
//! - Minimum duration validation against the cue length
//! - Settings file and cue loading errors

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

// ============================================================================
// Test Helpers
// ============================================================================

fn clock() -> Command {
    Command::cargo_bin("countdown-clock").unwrap()
}

/// Writes a settings file so tests never pick up the user's own settings.
fn settings_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ============================================================================
// Help and Completions
// ============================================================================

#[test]
fn test_no_args_prints_help() {
    clock()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_version() {
    clock()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("countdown-clock"));
}

#[test]
fn test_completions_bash() {
    clock()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("countdown-clock"));
}

// ============================================================================
// Duration Parsing
// ============================================================================

#[test]
fn test_malformed_interval_rejected() {
    clock()
        .args(["run", "--interval", "1:2:3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in MM:SS form"));
}

#[test]
fn test_non_numeric_delay_rejected() {
    clock()
        .args(["run", "--delay", "ab:05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid non-negative number"));
}

// ============================================================================
// Minimum Duration Validation
// ============================================================================

#[test]
fn test_interval_shorter_than_cue_rejected() {
    let settings = settings_file("{}");
    clock()
        .args(["run", "--no-sound", "--interval", "00:01", "--delay", "00:05"])
        .arg("--config")
        .arg(settings.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Interval must be at least 2 seconds!",
        ));
}

#[test]
fn test_delay_shorter_than_cue_rejected() {
    let settings = settings_file("{}");
    clock()
        .args(["run", "--no-sound", "--interval", "00:10", "--delay", "00:01"])
        .arg("--config")
        .arg(settings.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Delay must be at least 2 seconds!"));
}

#[test]
fn test_minimum_follows_tone_length() {
    let settings = settings_file("{}");
    clock()
        .args(["run", "--no-sound", "--tone-ms", "3000", "--interval", "00:03"])
        .arg("--config")
        .arg(settings.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Interval must be at least 4 seconds!",
        ));
}

#[test]
fn test_settings_delay_validated() {
    let settings = settings_file(r#"{"interval":"00:10","delay":"00:00"}"#);
    clock()
        .args(["run", "--no-sound", "--config"])
        .arg(settings.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Delay must be at least"));
}

// ============================================================================
// Settings and Cue Loading
// ============================================================================

#[test]
fn test_invalid_settings_file() {
    let settings = settings_file("{not json");
    clock()
        .args(["run", "--config"])
        .arg(settings.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse settings file"));
}

#[test]
fn test_missing_settings_file() {
    clock()
        .args(["run", "--config", "/nonexistent/countdown-clock.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read settings file"));
}

#[test]
fn test_missing_sound_file() {
    let settings = settings_file("{}");
    clock()
        .args(["run", "--sound", "/nonexistent/beep.wav"])
        .arg("--config")
        .arg(settings.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load the audio cue"))
        .stderr(predicate::str::contains("sound file not found"));
}
