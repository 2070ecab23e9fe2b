use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn help_describes_the_row_count_argument() {
    let output = cargo_bin_cmd!("latency-bench")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let help = String::from_utf8_lossy(&output);
    assert!(help.contains("[ROWS]"));
    assert!(help.contains("--neon-url"));
    assert!(help.contains("--turso-url"));
}

#[test]
fn bulk_variant_takes_no_positional_argument() {
    let output = cargo_bin_cmd!("bulk-bench")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let help = String::from_utf8_lossy(&output);
    assert!(!help.contains("[ROWS]"));
    assert!(help.contains("--neon-url"));
}

#[test]
fn missing_credentials_fail_before_any_phase() {
    let output = cargo_bin_cmd!("latency-bench")
        .env_remove("NEON_DATABASE_URL")
        .env_remove("TURSO_DATABASE_URL")
        .env_remove("TURSO_AUTH_TOKEN")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&output);
    assert!(stderr.contains("--neon-url") || stderr.contains("NEON_DATABASE_URL"));
}
