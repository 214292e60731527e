//! Run the chrome-policy binary in dry-run mode and inspect its JSON dump

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chrome-policy"))
        .args(args)
        .output()
        .expect("Failed to run chrome-policy")
}

fn parse_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("dry run should print JSON")
}

#[test]
fn test_dry_run_from_empty_creates_key() {
    let output = run(&["--dry-run", "--from-empty"]);
    assert!(
        output.status.success(),
        "dry run failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let dump = parse_stdout(&output);
    assert_eq!(dump["browser"], "Google Chrome");
    assert_eq!(dump["reports"][0]["outcome"], "created");
    assert_eq!(dump["reports"][0]["written"], 65);

    let chrome = &dump["state"][r"SOFTWARE\Policies\Google\Chrome"];
    assert_eq!(chrome["SitePerProcess"], 1);
    assert_eq!(chrome["HSTSPolicyBypassList"], "");
}

#[test]
fn test_dry_run_existing_key_is_applied() {
    let output = run(&["--dry-run"]);
    assert!(output.status.success());
    assert_eq!(parse_stdout(&output)["reports"][0]["outcome"], "applied");
}

#[test]
#[cfg(not(windows))]
fn test_real_run_refuses_without_registry() {
    let output = run(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not supported"),
        "unexpected stderr: {}",
        stderr
    );
}
