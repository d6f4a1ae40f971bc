//! CLI tests for the hedera-bridge binary.
//!
//! Everything here runs offline: malformed variables are rejected before a
//! mirror client is acquired, and well-formed ones are pointed at a mirror URL
//! the gateway refuses. Tests that hit the public testnet mirror are ignored
//! by default.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEDERA_ENV: &[&str] = &[
    "HEDERA_NETWORK",
    "HEDERA_OPERATOR_ID",
    "HEDERA_OPERATOR_KEY",
    "HEDERA_MIRROR_PROVIDER",
    "HEDERA_MIRROR_API_KEY",
    "HEDERA_MIRROR_URL",
    "HEDERA_MIRROR_TIMEOUT_SECS",
    "HEDERA_MIRROR_CONNECT_TIMEOUT_SECS",
];

/// Passes configuration validation but is refused when a client is acquired.
const UNUSABLE_MIRROR: &str = "ftp://mirror.invalid/api/v1";

/// The binary with a clean environment and an empty config directory.
fn bridge(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("hedera-bridge").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG");
    for var in HEDERA_ENV {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// config
// =============================================================================

#[test]
fn test_config_defaults() {
    let home = TempDir::new().unwrap();
    let output = bridge(&home).args(["--json", "config"]).output().unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["network"], "testnet");
    assert_eq!(json["mirror_provider"], "public");
    assert_eq!(json["timeout_secs"], 30);
    assert!(json["operator_key"].is_null());
}

#[test]
fn test_config_file_secrets_redacted() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bridge.json");
    fs::write(
        &path,
        r#"{
            "network": "mainnet",
            "operator_id": "0.0.1001",
            "operator_key": "db484b828e64b2d8f12ce3c0a0e93a0b8cce7af1bb8f39c97732394482538e10"
        }"#,
    )
    .unwrap();

    let output = bridge(&home)
        .args(["--json", "--config"])
        .arg(&path)
        .arg("config")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["network"], "mainnet");
    assert_eq!(json["operator_id"], "0.0.1001");
    assert_eq!(json["operator_key"], "<redacted>");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("db484b82"));
}

#[test]
fn test_environment_and_flag_override_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bridge.json");
    fs::write(&path, r#"{"network": "mainnet"}"#).unwrap();

    bridge(&home)
        .env("HEDERA_NETWORK", "previewnet")
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("previewnet"));

    bridge(&home)
        .env("HEDERA_NETWORK", "previewnet")
        .args(["--network", "main", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mainnet"));
}

#[test]
fn test_invalid_configuration_fails() {
    let home = TempDir::new().unwrap();

    bridge(&home)
        .args(["--network", "devnet", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown network"));

    bridge(&home)
        .env("HEDERA_MIRROR_PROVIDER", "arkhia")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires an API key"));

    bridge(&home)
        .args(["--config", "/nonexistent/hedera-bridge.json", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn test_resolve_malformed_path_prints_empty_line() {
    let home = TempDir::new().unwrap();
    bridge(&home)
        .args(["resolve", "hedera-account.0.0.98.hbarBalance"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_resolve_json_null_per_path() {
    let home = TempDir::new().unwrap();
    bridge(&home)
        .args([
            "--json",
            "resolve",
            "hedera-widget.[0.0.1].name",
            "hedera-topic.[0.0.5].message[0].messageContent",
        ])
        .assert()
        .success()
        .stdout("null\nnull\n");
}

#[test]
fn test_resolve_fails_when_client_cannot_be_acquired() {
    let home = TempDir::new().unwrap();
    bridge(&home)
        .env("HEDERA_MIRROR_URL", UNUSABLE_MIRROR)
        .args(["resolve", "hedera-account.[0.0.98].accountMemo"])
        .assert()
        .failure()
        .stdout("\n")
        .stderr(predicate::str::contains("Unsupported mirror URL scheme"))
        .stderr(predicate::str::contains("1 of 1 variables failed to resolve"));
}

#[test]
fn test_resolve_requires_a_path() {
    let home = TempDir::new().unwrap();
    bridge(&home).arg("resolve").assert().failure();
}

// =============================================================================
// substitute
// =============================================================================

#[test]
fn test_substitute_leaves_unresolvable_variables() {
    let home = TempDir::new().unwrap();
    bridge(&home)
        .args([
            "substitute",
            "--text",
            "memo #hedera-account.[nope].accountMemo# stays",
        ])
        .assert()
        .success()
        .stdout("memo #hedera-account.[nope].accountMemo# stays\n");
}

#[test]
fn test_substitute_fails_when_variables_fail() {
    let home = TempDir::new().unwrap();
    let text = "memo #hedera-account.[0.0.98].accountMemo# and #hedera-account.[nope].accountMemo#";

    bridge(&home)
        .env("HEDERA_MIRROR_URL", UNUSABLE_MIRROR)
        .args(["substitute", "--text", text])
        .assert()
        .failure()
        .stdout(format!("{}\n", text))
        .stderr(predicate::str::contains("hedera-account.[0.0.98].accountMemo: "))
        .stderr(predicate::str::contains("1 of 2 variables failed to resolve"));

    let output = bridge(&home)
        .env("HEDERA_MIRROR_URL", UNUSABLE_MIRROR)
        .args(["--json", "substitute", "--text", text])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["text"], text);
    assert_eq!(json["failed"][0]["path"], "hedera-account.[0.0.98].accountMemo");
    assert_eq!(json["failed"][0]["kind"], "unclassified");
    assert_eq!(json["failed"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_substitute_from_file_json() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("template.txt");
    fs::write(&path, "Supply: #hedera-token.[x].totalSupply#\n").unwrap();

    let output = bridge(&home)
        .args(["--json", "substitute", "--file"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["text"], "Supply: #hedera-token.[x].totalSupply#\n");
    assert_eq!(json["variables"][0], "hedera-token.[x].totalSupply");
    assert_eq!(json["unresolved"][0], "hedera-token.[x].totalSupply");
    assert_eq!(json["failed"], serde_json::json!([]));
}

#[test]
fn test_substitute_from_stdin() {
    let home = TempDir::new().unwrap();
    bridge(&home)
        .arg("substitute")
        .write_stdin("no variables here")
        .assert()
        .success()
        .stdout("no variables here\n");
}

#[test]
fn test_substitute_text_and_file_conflict() {
    let home = TempDir::new().unwrap();
    bridge(&home)
        .args(["substitute", "--text", "a", "--file", "b.txt"])
        .assert()
        .failure();
}

// =============================================================================
// load
// =============================================================================

#[test]
fn test_load_rejects_bad_arguments() {
    let home = TempDir::new().unwrap();

    bridge(&home)
        .args(["load", "wallet", "0.0.98", "--field", "memo=accountMemo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entity kind"));

    bridge(&home)
        .args(["load", "account", "0.0.98", "--field", "memo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAME=ATTRIBUTE"));
}

#[test]
fn test_load_invalid_id_yields_no_rows() {
    let home = TempDir::new().unwrap();
    bridge(&home)
        .args(["--json", "load", "token", "not-an-id", "--field", "name=name"])
        .assert()
        .success()
        .stdout("[]\n");
}

// =============================================================================
// Live mirror node
// =============================================================================

#[test]
#[ignore = "requires network access to the testnet mirror node"]
fn test_resolve_against_testnet() {
    let home = TempDir::new().unwrap();
    bridge(&home)
        .args([
            "resolve",
            "hedera-account.[0.0.98].accountId",
            "hedera-account.[0.0.98].isDeleted",
        ])
        .assert()
        .success()
        .stdout("0.0.98\nfalse\n");
}
