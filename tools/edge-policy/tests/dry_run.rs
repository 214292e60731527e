//! Run the edge-policy binary in dry-run mode and inspect its JSON dump

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_edge-policy"))
        .args(args)
        .output()
        .expect("Failed to run edge-policy")
}

fn parse_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("dry run should print JSON")
}

#[test]
fn test_dry_run_with_edge_installed() {
    let output = run(&["--dry-run"]);
    assert!(
        output.status.success(),
        "dry run failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let dump = parse_stdout(&output);
    assert_eq!(dump["browser"], "Microsoft Edge");
    assert_eq!(dump["reports"][0]["outcome"], "applied");
    assert_eq!(dump["reports"][1]["outcome"], "applied");
    assert_eq!(
        dump["state"][r"SOFTWARE\Policies\Microsoft\EdgeUpdate"]["UpdateDefault"],
        1
    );
}

#[test]
fn test_dry_run_without_edge_skips_everything() {
    let output = run(&["--dry-run", "--from-empty"]);
    assert!(output.status.success());

    let dump = parse_stdout(&output);
    assert_eq!(dump["reports"][0]["outcome"], "skipped");
    assert_eq!(dump["reports"][1]["outcome"], "skipped");
    assert_eq!(dump["state"], serde_json::json!({}));
}
