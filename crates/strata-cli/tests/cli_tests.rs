//! End-to-end tests for the `strata` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `strata` with config lookups pinned inside `home`.
#[allow(deprecated)]
fn strata(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("STRATA_TEMPLATES_DIR")
        .env_remove("STRATA__TEMPLATES__LOCAL_PATH")
        .env("NO_COLOR", "1");
    cmd
}

fn init(home: &Path, folder: &str, roles: &str) {
    strata(home)
        .args(["init", folder, "--roles", roles])
        .assert()
        .success();
}

fn set_version(component: &Path, version: u32) {
    let path = component.join("build.properties");
    let text = fs::read_to_string(&path).unwrap();
    fs::write(
        &path,
        text.replace("component.version=12", &format!("component.version={version}")),
    )
    .unwrap();
}

// ── basics ───────────────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("upgrade"))
        .stdout(predicate::str::contains("remove-unused-roles"));
}

#[test]
fn version_flag() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_role_is_a_usage_error() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .args(["init", "lib", "--roles", "php,cgi"])
        .assert()
        .code(2);
    assert!(!tmp.path().join("lib").exists());
}

// ── init / add-roles ─────────────────────────────────────────────────────────

#[test]
fn init_provisions_component() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .args(["init", "lib", "--roles", "php,test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created php-library component (v12)"));

    let lib = tmp.path().join("lib");
    assert!(lib.join("src/php/dummy.php").is_file());
    assert!(lib.join("src/tests/unit-tests/bootstrap.php").is_file());
    assert!(lib.join("phpunit.xml.dist").is_file());
    assert!(!lib.join("src/bin").exists());

    let props = fs::read_to_string(lib.join("build.properties")).unwrap();
    assert!(props.contains("component.version=12"));
}

#[test]
fn init_uses_configured_default_roles() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("strata.toml");
    fs::write(&config, "[defaults]\nroles = [\"www\"]\n").unwrap();

    strata(tmp.path())
        .args(["--config", config.to_str().unwrap(), "init", "site"])
        .assert()
        .success();

    assert!(tmp.path().join("site/src/www").is_dir());
    assert!(!tmp.path().join("site/src/php").exists());
}

#[test]
fn unknown_configured_default_role_is_a_config_error() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("strata.toml");
    fs::write(&config, "[defaults]\nroles = [\"cgi\"]\n").unwrap();

    strata(tmp.path())
        .args(["--config", config.to_str().unwrap(), "init", "site"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("defaults.roles"));
    assert!(!tmp.path().join("site").exists());
}

#[test]
fn init_over_existing_component_fails() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php");

    strata(tmp.path())
        .args(["init", "lib", "--roles", "php"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn add_roles_on_empty_folder_is_not_found() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .args(["add-roles", ".", "--roles", "bin"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No component found"));
}

#[test]
fn add_roles_creates_folders() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php");

    strata(tmp.path())
        .args(["add-roles", "lib", "--roles", "bin,data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added roles: bin,data"));

    assert!(tmp.path().join("lib/src/bin").is_dir());
    assert!(tmp.path().join("lib/src/data").is_dir());
}

// ── status ───────────────────────────────────────────────────────────────────

#[test]
fn status_json_reports_state_and_roles() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php,test");

    let output = strata(tmp.path())
        .args(["--output-format", "json", "status", "lib"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["state"], "up-to-date");
    assert_eq!(status["recorded_version"], 12);
    assert_eq!(status["active_roles"], serde_json::json!(["php", "test"]));
}

#[test]
fn status_of_empty_folder() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("empty"));
}

// ── upgrade ──────────────────────────────────────────────────────────────────

#[test]
fn upgrade_at_latest_is_refused() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php");

    strata(tmp.path())
        .args(["upgrade", "lib"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already at version 12"));
}

#[test]
fn upgrade_from_older_generation() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php,test");
    let lib = tmp.path().join("lib");
    set_version(&lib, 9);

    strata(tmp.path())
        .args(["upgrade", "lib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upgrading from v9 to v10"))
        .stdout(predicate::str::contains("from v9 to v12 (3 steps)"));

    let props = fs::read_to_string(lib.join("build.properties")).unwrap();
    assert!(props.contains("component.version=12"));
}

#[test]
fn upgrade_to_intermediate_version() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php");
    let lib = tmp.path().join("lib");
    set_version(&lib, 5);

    strata(tmp.path())
        .args(["upgrade", "lib", "--to", "7"])
        .assert()
        .success();

    let props = fs::read_to_string(lib.join("build.properties")).unwrap();
    assert!(props.contains("component.version=7"));
}

#[test]
fn upgrade_refuses_foreign_layout() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("build.xml"), "<project/>").unwrap();

    strata(tmp.path())
        .arg("upgrade")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Incompatible layout"));
    assert!(!tmp.path().join("build.properties").exists());
}

// ── remove-unused-roles ──────────────────────────────────────────────────────

#[test]
fn dry_run_lists_but_keeps_folders() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php,bin");
    fs::write(tmp.path().join("lib/src/php/Library.php"), "<?php\n").unwrap();

    strata(tmp.path())
        .args(["remove-unused-roles", "lib", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/bin"))
        .stdout(predicate::str::contains("Would remove"));

    assert!(tmp.path().join("lib/src/bin").is_dir());
}

#[test]
fn yes_removes_unused_role() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php,bin");
    fs::write(tmp.path().join("lib/src/php/Library.php"), "<?php\n").unwrap();

    strata(tmp.path())
        .args(["remove-unused-roles", "lib", "--yes"])
        .assert()
        .success();

    assert!(!tmp.path().join("lib/src/bin").exists());
    assert!(tmp.path().join("lib/src/php/Library.php").is_file());
}

#[test]
fn declined_confirmation_cancels() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php,bin");
    fs::write(tmp.path().join("lib/src/php/Library.php"), "<?php\n").unwrap();

    strata(tmp.path())
        .args(["remove-unused-roles", "lib"])
        .write_stdin("n\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cancelled"));

    assert!(tmp.path().join("lib/src/bin").is_dir());
}

#[test]
fn nothing_unused_needs_no_confirmation() {
    let tmp = TempDir::new().unwrap();
    init(tmp.path(), "lib", "php");
    fs::write(tmp.path().join("lib/src/php/Library.php"), "<?php\n").unwrap();

    strata(tmp.path())
        .args(["remove-unused-roles", "lib"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

// ── templates / config / completions ─────────────────────────────────────────

#[test]
fn templates_lists_embedded_set() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("php-library/build.xml"))
        .stdout(predicate::str::contains("php-library/phpunit.xml.dist"));
}

#[test]
fn templates_folder_in_working_directory_is_not_picked_up() {
    let tmp = TempDir::new().unwrap();
    let local = tmp.path().join("templates/php-library");
    fs::create_dir_all(&local).unwrap();
    fs::write(local.join("build.xml"), "<project name=\"local\"/>").unwrap();

    init(tmp.path(), "lib", "php");

    let build = fs::read_to_string(tmp.path().join("lib/build.xml")).unwrap();
    assert_ne!(build, "<project name=\"local\"/>");
    strata(tmp.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("php-library/phpunit.xml.dist"));
}

#[test]
fn config_set_then_get() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("strata.toml");
    let config = config.to_str().unwrap();

    strata(tmp.path())
        .args(["--config", config, "config", "init"])
        .assert()
        .success();
    strata(tmp.path())
        .args(["--config", config, "config", "set", "defaults.roles", "php,doc"])
        .assert()
        .success();
    strata(tmp.path())
        .args(["--config", config, "config", "get", "defaults.roles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults.roles = php,doc"));
}

#[test]
fn missing_explicit_config_is_a_config_error() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .args(["--config", "absent.toml", "status"])
        .assert()
        .code(4);
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    strata(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strata"));
}
