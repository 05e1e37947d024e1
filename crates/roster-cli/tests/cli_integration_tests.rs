//! CLI Integration Tests
//!
//! Tests for the `roster` binary using `assert_cmd`. Every test points the CLI
//! at its own SQLite file through a temporary `roster.toml`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary working directory with a config pointing at a private database.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self::with_config("")
    }

    /// Creates the workspace; `extra` is appended to the generated config.
    fn with_config(extra: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("data").join("roster.db");
        let config = format!(
            "[database]\npath = {:?}\n\n{extra}",
            db_path.display().to_string()
        );
        fs::write(dir.path().join("roster.toml"), config).unwrap();
        Self { dir }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("roster.toml")
    }

    /// The CLI binary with `--config` set and the environment scrubbed.
    #[allow(deprecated)]
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("roster").unwrap();
        cmd.current_dir(self.dir.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("ROSTER_CACHE__SIZE")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    fn create(&self, name: &str, score: &str) {
        self.cmd()
            .args(["create", "--name", name, "--score", score])
            .assert()
            .success();
    }
}

// =============================================================================
// Help & Version Tests
// =============================================================================

#[test]
fn test_help_displays_usage() {
    Workspace::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Roster CLI"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_displays_version() {
    Workspace::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("roster"));
}

#[test]
fn test_invalid_command_shows_error() {
    Workspace::new()
        .cmd()
        .arg("invalid_command_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// =============================================================================
// Config Command Tests
// =============================================================================

#[test]
fn test_config_prints_effective_toml() {
    let ws = Workspace::with_config("[cache]\nsize = 4\n");

    ws.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[cache]"))
        .stdout(predicate::str::contains("size = 4"))
        .stdout(predicate::str::contains("read_through = false"));
}

#[test]
fn test_config_env_overrides_file() {
    let ws = Workspace::with_config("[cache]\nsize = 4\n");

    ws.cmd()
        .env("ROSTER_CACHE__SIZE", "3")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("size = 3"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let ws = Workspace::with_config("[cache]\nsize = 0\n");

    ws.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cache.size"));
}

// =============================================================================
// Record Command Tests
// =============================================================================

#[test]
fn test_list_on_new_database() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records."));

    assert!(ws.dir.path().join("data").join("roster.db").exists());
}

#[test]
fn test_create_then_list_json() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["create", "--name", "Ana", "--score", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("record 1"));

    ws.cmd()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Ana\""))
        .stdout(predicate::str::contains("\"is_deleted\": false"));
}

#[test]
fn test_create_invalid_record_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["create", "--name", "Ana", "--score", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ROSTER-001"))
        .stderr(predicate::str::contains("non-positive score"));

    ws.cmd()
        .args(["create", "--name", " ", "--score", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name empty"));
}

#[test]
fn test_get_existing_and_missing() {
    let ws = Workspace::new();
    ws.create("Leo", "3");

    ws.cmd()
        .args(["get", "1", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Leo\""));

    ws.cmd()
        .args(["get", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ROSTER-002"));
}

#[test]
fn test_update_existing_and_missing() {
    let ws = Workspace::new();
    ws.create("Leo", "3");

    ws.cmd()
        .args(["update", "1", "--name", "Leo", "--score", "4.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("record 1"));

    ws.cmd()
        .args(["get", "1", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4.5"));

    ws.cmd()
        .args(["update", "7", "--name", "Ghost", "--score", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ROSTER-003"));
}

#[test]
fn test_delete_is_soft() {
    let ws = Workspace::new();
    ws.create("Ana", "5");
    ws.create("Zoe", "9");

    ws.cmd()
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("record 1"));

    ws.cmd()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zoe"))
        .stdout(predicate::str::contains("Ana").not());

    ws.cmd()
        .args(["list", "--all", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("\"is_deleted\": true"));

    ws.cmd()
        .args(["delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ROSTER-004"));
}

#[test]
fn test_seed_then_by_score() {
    let ws = Workspace::new();
    ws.create("Old", "1");

    ws.cmd()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 demo records"));

    ws.cmd()
        .args(["by-score", "7.8", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lucia"))
        .stdout(predicate::str::contains("Pepe").not());

    ws.cmd()
        .args(["list", "--all", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old").not());
}

#[test]
fn test_init_data_seeds_on_startup() {
    let ws = Workspace::with_config("");
    let config = fs::read_to_string(ws.config_path()).unwrap();
    fs::write(
        ws.config_path(),
        config.replace("[database]\n", "[database]\ninit_data = true\n"),
    )
    .unwrap();

    ws.cmd()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alejandro"));
}

// =============================================================================
// Demo Command Tests
// =============================================================================

#[test]
fn test_demo_walkthrough() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["demo", "--cache-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Roster demo"))
        .stdout(predicate::str::contains("2/2 [3:Maria(5.1), 4:Alejandro(6)]"))
        .stdout(predicate::str::contains("name empty"))
        .stdout(predicate::str::contains("evictions"));

    // The walkthrough never touches the configured database.
    assert!(!ws.dir.path().join("data").exists());
}

#[test]
fn test_demo_rejects_zero_cache_size() {
    Workspace::new()
        .cmd()
        .args(["demo", "--cache-size", "0"])
        .assert()
        .failure();
}
