use assert_cmd::cargo::cargo_bin_cmd;

fn fixture(path: &str) -> String {
    format!("{}/tests/fixtures/{path}", env!("CARGO_MANIFEST_DIR"))
}

fn scan_cmd(log_dir: &std::path::Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("solidscore");
    cmd.env("GITHUB_REPOSITORY", "acme/widgets")
        .env("PR_NUMBER", "7")
        .env("GITHUB_RUN_ID", "123456")
        .env("GITHUB_TOKEN", "ghs_smoke")
        .env("SOLIDSCORE_LOG_DIR", log_dir);
    cmd
}

#[test]
fn help_lists_scan_flags() {
    let mut cmd = cargo_bin_cmd!("solidscore");
    cmd.arg("--help");
    let out = cmd.assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");

    assert!(stdout.contains("--report"));
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--max-findings"));
}

#[test]
fn dry_run_prints_the_composed_comment() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cmd = scan_cmd(temp.path());
    cmd.arg("--dry-run")
        .arg("--report")
        .arg(fixture("reports/solid-violations.json"));
    let out = cmd.assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");

    assert!(stdout.contains("scored 7 findings"));
    assert!(stdout.contains("**Estimated SOLID Score:**"));
    assert!(stdout.contains("- SRP: "));
    assert!(stdout.contains("**Top Findings:**"));
    assert!(stdout.contains("https://github.com/acme/widgets/actions/runs/123456"));
}

#[test]
fn empty_report_scores_a_clean_hundred() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cmd = scan_cmd(temp.path());
    cmd.arg("--dry-run")
        .arg("--report")
        .arg(fixture("reports/empty.json"));
    let out = cmd.assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");

    assert!(stdout.contains("**Estimated SOLID Score:** 100"));
    assert!(stdout.contains("No violations found."));
}

#[test]
fn config_file_can_disable_publishing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cmd = scan_cmd(temp.path());
    cmd.arg("--config")
        .arg(fixture("configs/no-publish.toml"))
        .arg("--report")
        .arg(fixture("reports/solid-violations.json"));
    let out = cmd.assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");

    // max_findings = 3 from the fixture config bounds the list.
    assert!(stdout.contains("SRP violation in OrderService"));
    assert!(!stdout.contains("identifier should be camelCase"));
}

#[test]
fn html_artifact_is_written_when_requested() {
    let temp = tempfile::tempdir().expect("tempdir");
    let html_path = temp.path().join("report.html");
    let mut cmd = scan_cmd(temp.path());
    cmd.arg("--dry-run")
        .arg("--report")
        .arg(fixture("reports/solid-violations.json"))
        .arg("--html-report")
        .arg(&html_path);
    cmd.assert().success();

    let html = std::fs::read_to_string(&html_path).expect("html artifact");
    assert!(html.contains("<strong>Total Findings:</strong> 7"));
}

#[test]
fn missing_report_file_exits_nonzero() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cmd = scan_cmd(temp.path());
    cmd.arg("--dry-run")
        .arg("--report")
        .arg(fixture("reports/does-not-exist.json"));
    cmd.assert().failure();
}

#[test]
fn missing_run_context_exits_nonzero() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cmd = scan_cmd(temp.path());
    cmd.env_remove("GITHUB_TOKEN")
        .arg("--dry-run")
        .arg("--report")
        .arg(fixture("reports/empty.json"));
    cmd.assert().failure();
}

#[test]
fn invalid_config_path_exits_nonzero() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut cmd = scan_cmd(temp.path());
    cmd.arg("--config")
        .arg(fixture("configs/missing.toml"))
        .arg("--report")
        .arg(fixture("reports/empty.json"));
    cmd.assert().failure();
}
