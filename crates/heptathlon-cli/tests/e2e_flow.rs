//! End-to-end tests for the `hept` binary.
//!
//! Tests the full pipeline: result file → parse → score → rank → stdout.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::{NamedTempFile, TempDir};

fn hept_binary() -> String {
    env!("CARGO_BIN_EXE_hept").to_string()
}

/// Command isolated from the user's config file and `HEPT_*` variables.
fn hept(home: &Path) -> Command {
    let mut cmd = Command::new(hept_binary());
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("HEPT_DUPLICATE_POLICY")
        .env_remove("HEPT_PARALLEL")
        .env_remove("HEPT_LINE_WIDTH")
        .env_remove("HEPT_DATE_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn results_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const TWO_DAYS: &str = "\
ana,100m,14.5,2024-01-02
bob,100m,13.0,2024-01-01 09:15
ana,high,1.6,2024-01-02

cleo,800m,2:10.3,2024-01-01
zed,100m,26.7,2024-01-01
";

/// Days print in calendar order, athletes by descending total, and
/// zero totals are left out.
#[test]
fn test_leaderboard_text_output() {
    let temp = TempDir::new().unwrap();
    let file = results_file(TWO_DAYS);

    let output = hept(temp.path()).arg(file.path()).output().unwrap();
    assert!(output.status.success(), "hept failed: {}", stderr(&output));

    let expected = "\
====================
Day 1: Jan 01, 2024
====================
BOB             1124
CLEO             960

====================
Day 2: Jan 02, 2024
====================
ANA             1645
";
    assert_eq!(stdout(&output), expected);
}

#[test]
fn test_parallel_flag_gives_same_output() {
    let temp = TempDir::new().unwrap();
    let file = results_file(TWO_DAYS);

    let sequential = hept(temp.path()).arg(file.path()).output().unwrap();
    let parallel = hept(temp.path())
        .arg("--parallel")
        .arg(file.path())
        .output()
        .unwrap();

    assert!(parallel.status.success(), "hept failed: {}", stderr(&parallel));
    assert_eq!(stdout(&sequential), stdout(&parallel));
}

/// An unknown event aborts the run with nothing on stdout.
#[test]
fn test_unrecognized_event_fails() {
    let temp = TempDir::new().unwrap();
    let file = results_file("ana,100m,14.5,2024-01-01\nbob,pole_vault,4.5,2024-01-01\n");

    let output = hept(temp.path()).arg(file.path()).output().unwrap();

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty(), "no partial leaderboard expected");
    let err = stderr(&output);
    assert!(err.contains("unrecognized event"), "stderr: {err}");
    assert!(err.contains("line 2"), "stderr: {err}");
}

#[test]
fn test_malformed_record_fails() {
    let temp = TempDir::new().unwrap();
    let file = results_file("ana,100m,14.5\n");

    let output = hept(temp.path()).arg(file.path()).output().unwrap();

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("malformed record"), "stderr: {}", stderr(&output));
}

#[test]
fn test_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.csv");

    let output = hept(temp.path()).arg(&missing).output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read"), "stderr: {}", stderr(&output));
}

#[test]
fn test_empty_file_prints_nothing() {
    let temp = TempDir::new().unwrap();
    let file = results_file("\n\n");

    let output = hept(temp.path()).arg(file.path()).output().unwrap();

    assert!(output.status.success(), "hept failed: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_empty_file_is_logged() {
    let temp = TempDir::new().unwrap();
    let file = results_file("\n");

    let output = hept(temp.path())
        .arg("--verbose")
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "hept failed: {}", stderr(&output));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("no records, nothing to print"),
        "stderr: {}",
        stderr(&output)
    );
}

/// Duplicates are rejected unless a policy says otherwise, either on the
/// command line or in the config file.
#[test]
fn test_duplicate_policy_sources() {
    let temp = TempDir::new().unwrap();
    let file = results_file("ana,100m,14.5,2024-01-01\nana,100m,13.0,2024-01-01\n");

    let rejected = hept(temp.path()).arg(file.path()).output().unwrap();
    assert!(!rejected.status.success());
    assert!(stderr(&rejected).contains("duplicate"), "stderr: {}", stderr(&rejected));

    let best = hept(temp.path())
        .args(["--duplicates", "keep_best"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(best.status.success(), "hept failed: {}", stderr(&best));
    assert!(stdout(&best).contains("ANA             1124"));

    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, r#"duplicate_policy = "keep_first""#).unwrap();
    config.flush().unwrap();

    let first = hept(temp.path())
        .arg("--config")
        .arg(config.path())
        .arg(file.path())
        .output()
        .unwrap();
    assert!(first.status.success(), "hept failed: {}", stderr(&first));
    assert!(stdout(&first).contains("ANA              909"));
}

#[test]
fn test_unknown_duplicate_policy_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let file = results_file("ana,100m,14.5,2024-01-01\n");

    let output = hept(temp.path())
        .args(["--duplicates", "sum"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().unwrap();
    let file = results_file(TWO_DAYS);

    let output = hept(temp.path())
        .arg("--json")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "hept failed: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let days = value["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-01-01");
    assert_eq!(days[0]["standings"][0]["athlete"], "bob");
    assert_eq!(days[1]["standings"][0]["event_scores"]["high_jump"], 736);
    assert_eq!(days[1]["standings"][0]["total_score"], 1645);
}

#[test]
fn test_reads_standard_input() {
    let temp = TempDir::new().unwrap();

    let mut child = hept(temp.path())
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn hept");

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(b"cleo,800m,2:10.3,2024-01-02\n").unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "hept failed: {}", stderr(&output));
    assert!(stdout(&output).contains("CLEO             960"));
}

/// Verbose logging goes to stderr and leaves stdout untouched.
#[test]
fn test_verbose_logs_do_not_touch_stdout() {
    let temp = TempDir::new().unwrap();
    let file = results_file(TWO_DAYS);

    let quiet = hept(temp.path()).arg(file.path()).output().unwrap();
    let verbose = hept(temp.path())
        .arg("--verbose")
        .arg(file.path())
        .output()
        .unwrap();

    assert!(verbose.status.success());
    assert_eq!(stdout(&quiet), stdout(&verbose));
    assert!(!stderr(&verbose).is_empty());
}
