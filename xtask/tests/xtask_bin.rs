use std::process::Command;

fn xtask(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .args(args)
        .output()
        .expect("run xtask")
}

#[test]
fn xtask_help_runs() {
    let output = xtask(&["help"]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
    assert!(stderr.contains("example-coverage"));
}

#[test]
fn unknown_command_fails() {
    let output = xtask(&["frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn print_schema_ids_lists_report_and_config() {
    let output = xtask(&["print-schema-ids"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tfguard.report.v1"));
    assert!(stdout.contains("tfguard.config.v1"));
}

#[test]
fn example_coverage_passes_for_registered_rules() {
    let output = xtask(&["example-coverage"]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn validate_config_accepts_good_and_rejects_bad_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let good = dir.path().join("good.toml");
    std::fs::write(
        &good,
        "profile = \"relaxed\"\nexclude = [\"aws-ebs-*\"]\n\n[rules.AWS087]\nenabled = false\n",
    )
    .expect("write");
    let output = xtask(&["validate-config", good.to_str().expect("utf8")]);
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let wrong_type = dir.path().join("wrong_type.toml");
    std::fs::write(&wrong_type, "max_findings = \"lots\"\n").expect("write");
    let output = xtask(&["validate-config", wrong_type.to_str().expect("utf8")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("schema validation"));

    let bad_profile = dir.path().join("bad_profile.toml");
    std::fs::write(&bad_profile, "profile = \"paranoid\"\n").expect("write");
    let output = xtask(&["validate-config", bad_profile.to_str().expect("utf8")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown profile"));
}
