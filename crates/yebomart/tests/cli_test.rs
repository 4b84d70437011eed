//! Integration tests for the `yebomart` CLI binary.
//!
//! These run against the built-in demo dataset or no backend at all, with
//! config and session directories pointed at a throwaway location.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `yebomart` binary with env isolation.
///
/// Clears all `YEBOMART_*` env vars and points config and data
/// directories at `home`.
fn yebomart_cmd(home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("yebomart");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("NO_COLOR", "1")
        .env_remove("YEBOMART_CONFIG")
        .env_remove("YEBOMART_PROFILE")
        .env_remove("YEBOMART_API_URL")
        .env_remove("YEBOMART_DATA_SOURCE")
        .env_remove("YEBOMART_OUTPUT")
        .env_remove("YEBOMART_INSECURE")
        .env_remove("YEBOMART_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn home() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = home();
    let output = yebomart_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = home();
    yebomart_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("YeboMart")
            .and(predicate::str::contains("shops"))
            .and(predicate::str::contains("subscriptions")),
    );
}

#[test]
fn test_version_flag() {
    let home = home();
    yebomart_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("yebomart"));
}

#[test]
fn test_completions_bash() {
    let home = home();
    yebomart_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Lists on demo data ──────────────────────────────────────────────

#[test]
fn test_shops_list_demo_table() {
    let home = home();
    yebomart_cmd(&home)
        .args(["shops", "list", "--data-source", "demo"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Fresh Mart 1")
                .and(predicate::str::contains("Page 1 of"))
                .and(predicate::str::contains("demo data")),
        );
}

#[test]
fn test_shops_list_json_carries_paging() {
    let home = home();
    let output = yebomart_cmd(&home)
        .args(["shops", "list", "-d", "demo", "-o", "json", "--page", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["page"], 2);
    assert!(view["items"].as_array().is_some_and(|items| !items.is_empty()));
}

#[test]
fn test_users_list_role_filter() {
    let home = home();
    let output = yebomart_cmd(&home)
        .args(["users", "list", "-d", "demo", "--role", "manager", "-o", "plain"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("user-4"));
}

#[test]
fn test_subscription_tiers_breakdown() {
    let home = home();
    yebomart_cmd(&home)
        .args(["subscriptions", "tiers", "-d", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enterprise").and(predicate::str::contains("Starter")));
}

// ── Errors and exit codes ───────────────────────────────────────────

#[test]
fn test_whoami_without_session_exits_auth() {
    let home = home();
    let output = yebomart_cmd(&home).arg("whoami").output().unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("Not signed in"));
}

#[test]
fn test_unknown_shop_exits_not_found() {
    let home = home();
    let output = yebomart_cmd(&home)
        .args(["shops", "get", "shop-999", "-d", "demo"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_delete_needs_yes_without_tty() {
    let home = home();
    let output = yebomart_cmd(&home)
        .args(["shops", "delete", "shop-1", "-d", "demo"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_delete_with_yes_succeeds_on_demo() {
    let home = home();
    yebomart_cmd(&home)
        .args(["shops", "delete", "shop-1", "-d", "demo", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("deleted"));
}

#[test]
fn test_bulk_renew_unknown_id_exits_not_found() {
    let home = home();
    let output = yebomart_cmd(&home)
        .args(["subscriptions", "renew", "sub-1", "sub-404", "-d", "demo", "-y"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_unknown_profile_is_rejected() {
    let home = home();
    let output = yebomart_cmd(&home)
        .args(["--profile", "staging", "shops", "list"])
        .output()
        .unwrap();
    assert_ne!(output.status.code(), Some(0));
    assert!(combined_output(&output).contains("staging"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_prints_location() {
    let home = home();
    yebomart_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_then_use_profile() {
    let home = home();
    yebomart_cmd(&home)
        .args(["--profile", "staging", "config", "set", "data_source", "demo"])
        .assert()
        .success();
    yebomart_cmd(&home)
        .args(["config", "use", "staging"])
        .assert()
        .success();
    yebomart_cmd(&home)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staging *"));

    // The stored data source now applies without a flag.
    yebomart_cmd(&home)
        .args(["shops", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fresh Mart 1"));
}
