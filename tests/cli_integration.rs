//! CLI integration tests for marketplace-lint
//!
//! Each test builds a small marketplace checkout in a temp directory and
//! runs the binary against it.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const VALID_MANIFEST: &str = r#"{
  "name": "alpha",
  "version": "1.0.0",
  "description": "First plugin"
}"#;

/// Get a command instance for the marketplace-lint binary, isolated from CI env
fn lint_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("marketplace-lint"));
    cmd.env_remove("GITHUB_ACTIONS")
        .env_remove("GITHUB_STEP_SUMMARY")
        .env_remove("MARKETPLACE_LINT_ROOT")
        .env_remove("RUST_LOG");
    cmd
}

fn write_plugin(root: &Path, dir: &str, manifest: Option<&str>) {
    let path = root.join("plugins").join(dir);
    fs::create_dir_all(&path).unwrap();
    if let Some(manifest) = manifest {
        fs::create_dir_all(path.join(".claude-plugin")).unwrap();
        fs::write(path.join(".claude-plugin/plugin.json"), manifest).unwrap();
    }
}

/// A repository with one valid plugin, documented in the README
fn setup_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_plugin(dir.path(), "alpha", Some(VALID_MANIFEST));
    fs::write(
        dir.path().join("README.md"),
        "# Marketplace\n\nInstall with `/plugin install alpha@example-marketplace`\n",
    )
    .unwrap();
    dir
}

// =============================================================================
// Schema Tests
// =============================================================================

#[test]
fn test_schema_passes_on_valid_repo() {
    let dir = setup_repo();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 plugin(s) to validate"))
        .stdout(predicate::str::contains("✅ Plugin 'alpha' is valid"))
        .stdout(predicate::str::contains("Validated plugins: 1"))
        .stdout(predicate::str::contains("✅ All plugins are valid!"));
}

#[test]
fn test_schema_root_from_env() {
    let dir = setup_repo();

    lint_cmd()
        .env("MARKETPLACE_LINT_ROOT", dir.path())
        .arg("schema")
        .assert()
        .success();
}

#[test]
fn test_schema_fails_on_missing_fields() {
    let dir = setup_repo();
    write_plugin(dir.path(), "beta", Some(r#"{"name": "beta"}"#));

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("schema")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "[beta] plugin.json missing required field 'version'",
        ))
        .stdout(predicate::str::contains(
            "[beta] plugin.json missing required field 'description'",
        ))
        .stdout(predicate::str::contains("❌ Errors (2):"));
}

#[test]
fn test_schema_missing_manifest_is_one_error() {
    let dir = setup_repo();
    write_plugin(dir.path(), "gamma", None);
    fs::create_dir_all(dir.path().join("plugins/gamma/commands")).unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("schema")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "[gamma] Missing required file: .claude-plugin/plugin.json",
        ))
        .stdout(predicate::str::contains("❌ Errors (1):"))
        .stdout(predicate::str::contains("Warnings").not());
}

#[test]
fn test_schema_warnings_do_not_fail() {
    let dir = setup_repo();
    fs::create_dir_all(dir.path().join("plugins/alpha/commands")).unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[alpha] commands/ directory exists but contains no .md files",
        ));
}

#[test]
fn test_schema_missing_plugins_dir() {
    let dir = TempDir::new().unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("schema")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Plugins directory not found"));
}

#[test]
fn test_schema_json_output() {
    let dir = setup_repo();
    write_plugin(dir.path(), "beta", Some("{ not json"));

    let output = lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "schema"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["command"], "schema");
    assert_eq!(json["passed"], false);
    assert_eq!(json["valid_plugins"], serde_json::json!(["alpha"]));
    assert_eq!(json["errors"][0]["plugin"], "beta");
    assert!(json["errors"][0]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON in plugin.json"));
    assert_eq!(json["errors"][0]["line"], 1);
}

#[test]
fn test_schema_github_annotations() {
    let dir = setup_repo();
    write_plugin(
        dir.path(),
        "beta",
        Some("{\n  \"name\": \"\",\n  \"version\": \"1.0.0\",\n  \"description\": \"d\"\n}"),
    );

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--github-actions", "schema"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error file=plugins/beta/.claude-plugin/plugin.json,line=2::[beta] plugin.json 'name' must be a non-empty string",
        ));
}

#[test]
fn test_schema_step_summary() {
    let dir = setup_repo();
    let summary = dir.path().join("summary.md");

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .env("GITHUB_ACTIONS", "true")
        .env("GITHUB_STEP_SUMMARY", &summary)
        .arg("schema")
        .assert()
        .success();

    let md = fs::read_to_string(&summary).unwrap();
    assert!(md.contains("### ✅ All Plugins Valid!"));
    assert!(md.contains("Successfully validated **1** plugins."));
}

#[test]
fn test_step_summary_ignored_outside_actions() {
    let dir = setup_repo();
    let summary = dir.path().join("summary.md");

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .env("GITHUB_STEP_SUMMARY", &summary)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("::").not());

    assert!(!summary.exists());
}

// =============================================================================
// Sync Tests
// =============================================================================

#[test]
fn test_sync_in_sync() {
    let dir = setup_repo();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 plugin(s) with plugin.json:"))
        .stdout(predicate::str::contains("  - alpha (1.0.0)"))
        .stdout(predicate::str::contains("Plugins mentioned in README.md: 1"))
        .stdout(predicate::str::contains("✅ Marketplace appears to be in sync!"));
}

#[test]
fn test_sync_undocumented_plugin_warns() {
    let dir = setup_repo();
    write_plugin(
        dir.path(),
        "beta",
        Some(r#"{"name": "beta", "version": "0.1.0", "description": "b"}"#),
    );

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "README.md may be missing these plugins: beta",
        ));
}

#[test]
fn test_sync_catalog_checked_only_when_catalog() {
    let dir = setup_repo();
    fs::write(dir.path().join("plugins.md"), "# Plugins\n\n- **Other Thing** - x\n").unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "plugins.md may be missing these plugins: alpha",
        ));

    fs::write(
        dir.path().join("plugins.md"),
        "# Plugins\n\n## Quickstart\n\nnothing here\n",
    )
    .unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("plugins.md may be missing").not());
}

#[test]
fn test_sync_missing_readme_warns() {
    let dir = setup_repo();
    fs::remove_file(dir.path().join("README.md")).unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md not found"));
}

#[test]
fn test_sync_changed_plugin_without_docs_fails() {
    let dir = setup_repo();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["sync", "--changed-file", "plugins/alpha/commands/run.md"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Plugin files were modified but marketplace files (README.md, plugins.md) were not updated.",
        ));
}

#[test]
fn test_sync_changed_plugin_with_docs_passes() {
    let dir = setup_repo();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args([
            "sync",
            "--changed-file",
            "plugins/alpha/commands/run.md",
            "--changed-file",
            "README.md",
        ])
        .assert()
        .success();
}

#[test]
fn test_sync_no_diff_skips_changed_files() {
    let dir = setup_repo();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args([
            "sync",
            "--no-diff",
            "--changed-file",
            "plugins/alpha/commands/run.md",
        ])
        .assert()
        .success();
}

#[test]
fn test_sync_diff_outside_git_passes() {
    let dir = setup_repo();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["sync", "--diff", "--base", "origin/main"])
        .assert()
        .success();
}

#[test]
fn test_sync_github_annotation_and_summary() {
    let dir = setup_repo();
    let summary = dir.path().join("summary.md");

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .env("GITHUB_STEP_SUMMARY", &summary)
        .args([
            "--github-actions",
            "sync",
            "--changed-file",
            "plugins/alpha/plugin.json",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error file=README.md::Plugin files were modified"));

    let md = fs::read_to_string(&summary).unwrap();
    assert!(md.contains("### ❌ Sync Check Failed"));
    assert!(md.contains("#### 📝 How to Fix"));
}

#[test]
fn test_sync_json_output() {
    let dir = setup_repo();

    let output = lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["-f", "json", "sync"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["command"], "sync");
    assert_eq!(json["passed"], true);
    assert_eq!(json["plugins"][0]["dir_name"], "alpha");
    assert_eq!(json["coverage"][0]["file"], "README.md");
    assert_eq!(json["coverage"][0]["mentioned"], 1);
}

// =============================================================================
// Check and Configuration Tests
// =============================================================================

#[test]
fn test_check_merges_both_reports() {
    let dir = setup_repo();
    write_plugin(dir.path(), "beta", Some(r#"{"name": "beta", "version": "1"}"#));

    let output = lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "check"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["command"], "check");
    assert_eq!(json["schema"]["passed"], false);
    assert_eq!(json["sync"]["passed"], true);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn test_check_text_prints_both_sections() {
    let dir = setup_repo();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("VALIDATION SUMMARY"))
        .stdout(predicate::str::contains("MARKETPLACE SYNC SUMMARY"));
}

#[test]
fn test_config_file_overrides_layout() {
    let dir = TempDir::new().unwrap();
    let plugin = dir.path().join("packages/alpha/.claude-plugin");
    fs::create_dir_all(&plugin).unwrap();
    fs::write(plugin.join("plugin.json"), VALID_MANIFEST).unwrap();
    fs::write(dir.path().join("DOCS.md"), "Nothing listed\n").unwrap();
    fs::write(
        dir.path().join("marketplace-lint.toml"),
        "plugins_dir = \"packages\"\nreadme = \"DOCS.md\"\n",
    )
    .unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validated plugins: 1"))
        .stdout(predicate::str::contains("DOCS.md may be missing these plugins: alpha"));
}

#[test]
fn test_check_unreadable_readme_keeps_schema_errors() {
    let dir = setup_repo();
    write_plugin(
        dir.path(),
        "beta",
        Some(r#"{"name": "beta", "version": "1.0.0", "description": ""}"#),
    );
    fs::write(dir.path().join("README.md"), b"\xff\xfe").unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "[beta] plugin.json 'description' must be a non-empty string",
        ))
        .stdout(predicate::str::contains("Could not read README.md:"))
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn test_sync_unreadable_readme_only_warns() {
    let dir = setup_repo();
    fs::write(dir.path().join("README.md"), b"\xff\xfe").unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not read README.md:"));
}

#[test]
fn test_config_dot_slash_paths_still_match_changes() {
    let dir = setup_repo();
    fs::write(
        dir.path().join("marketplace-lint.toml"),
        "plugins_dir = \"./plugins\"\nreadme = \"./README.md\"\n",
    )
    .unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["sync", "--changed-file", "plugins/alpha/commands/run.md"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Plugin files were modified"));

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .args([
            "sync",
            "--changed-file",
            "plugins/alpha/commands/run.md",
            "--changed-file",
            "README.md",
        ])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_is_fatal() {
    let dir = setup_repo();
    fs::write(dir.path().join("marketplace-lint.toml"), "unknown_key = 1\n").unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("schema")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_missing_root_is_fatal() {
    let dir = TempDir::new().unwrap();

    lint_cmd()
        .arg("--root")
        .arg(dir.path().join("nope"))
        .arg("schema")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
