//! End-to-end tests of the `agents` binary.
//!
//! `HOME` points at a scratch directory in every test so no real
//! `~/.agents-config` is read.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn agents(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("agents").expect("agents binary");
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("AGENTS_CONFIG_TEMPLATES")
        .env_remove("RUST_LOG");
    cmd
}

/// Scratch dir with the built-in templates installed under `templates/`.
fn with_templates() -> TempDir {
    let tmp = TempDir::new().expect("tempdir");
    agents(tmp.path())
        .arg("--templates")
        .arg(tmp.path().join("templates"))
        .args(["templates", "install"])
        .assert()
        .success();
    tmp
}

#[test]
fn templates_install_writes_all_four_sources() {
    let tmp = with_templates();
    for rel in [
        "templates/repo/AGENTS.md.template",
        "templates/repo/AGENT_NOTES.md.template",
        "templates/global/AGENTS.md.template",
        "templates/global/AGENT_NOTES_GLOBAL.md.template",
    ] {
        tmp.child(rel).assert(predicate::path::is_file());
    }
}

#[test]
fn setup_creates_workspace_and_repo_documents() {
    let tmp = with_templates();
    let ws = tmp.child("ws");
    let repo = ws.child("repo");

    agents(tmp.path())
        .arg("--templates")
        .arg(tmp.path().join("templates"))
        .arg("setup")
        .arg("--workspace-root")
        .arg(ws.path())
        .arg("--repo-root")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized workspace policy"))
        .stdout(predicate::str::contains("Applied policy to"));

    ws.child("AGENTS.md").assert(predicate::path::is_file());
    ws.child("AGENT_NOTES_GLOBAL.md").assert(predicate::path::is_file());
    let ws_str = ws.path().display().to_string();
    repo.child("AGENTS.md")
        .assert(predicate::str::contains(ws_str.as_str()));
    repo.child("AGENT_NOTES.md")
        .assert(predicate::str::contains(ws_str.as_str()));
    repo.child(".gitignore")
        .assert("/docs/\nAGENT_NOTES*.md\n.agentsmd\n");
}

#[test]
fn apply_is_idempotent_across_invocations() {
    let tmp = with_templates();
    let ws = tmp.child("ws");
    let repo = ws.child("repo");

    for _ in 0..3 {
        agents(tmp.path())
            .arg("--templates")
            .arg(tmp.path().join("templates"))
            .arg("apply")
            .arg("--workspace-root")
            .arg(ws.path())
            .arg("--repo-root")
            .arg(repo.path())
            .assert()
            .success();
    }

    repo.child(".gitignore")
        .assert("/docs/\nAGENT_NOTES*.md\n.agentsmd\n");
}

#[test]
fn apply_accepts_several_repo_roots() {
    let tmp = with_templates();
    let ws = tmp.child("ws");

    agents(tmp.path())
        .arg("--templates")
        .arg(tmp.path().join("templates"))
        .arg("apply")
        .arg("--workspace-root")
        .arg(ws.path())
        .arg("--repo-root")
        .arg(ws.child("one").path())
        .arg("--repo-root")
        .arg(ws.child("two").path())
        .assert()
        .success();

    ws.child("one/AGENT_NOTES.md").assert(predicate::path::is_file());
    ws.child("two/AGENT_NOTES.md").assert(predicate::path::is_file());
}

#[test]
fn relative_paths_resolve_against_current_dir() {
    let tmp = with_templates();

    agents(tmp.path())
        .current_dir(tmp.path())
        .args(["--templates", "templates"])
        .args(["apply", "--workspace-root", "ws", "--repo-root", "ws/repo"])
        .assert()
        .success();

    let ws_str = tmp.path().join("ws").display().to_string();
    tmp.child("ws/repo/AGENTS.md")
        .assert(predicate::str::contains(ws_str.as_str()));
}

#[test]
fn parent_components_are_resolved_before_rendering() {
    let tmp = with_templates();
    let sub = tmp.child("sub");
    sub.create_dir_all().expect("mkdir");

    agents(tmp.path())
        .current_dir(sub.path())
        .args(["--templates", "../templates"])
        .args(["setup", "--workspace-root", "../ws", "--repo-root", "./../ws/./repo"])
        .assert()
        .success();

    let expected = tmp.path().join("ws").join("AGENT_NOTES_GLOBAL.md");
    tmp.child("ws/repo/AGENTS.md")
        .assert(predicate::str::contains(expected.display().to_string()))
        .assert(predicate::str::contains("..").not());
}

#[test]
fn missing_templates_fail_with_path() {
    let tmp = TempDir::new().expect("tempdir");
    let ws = tmp.child("ws");

    agents(tmp.path())
        .arg("--templates")
        .arg(tmp.path().join("nowhere"))
        .arg("apply")
        .arg("--workspace-root")
        .arg(ws.path())
        .arg("--repo-root")
        .arg(ws.child("repo").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required template"))
        .stderr(predicate::str::contains("AGENTS.md.template"));

    ws.child("repo").assert(predicate::path::missing());
}

#[test]
fn missing_repo_root_flag_is_usage_error() {
    let tmp = TempDir::new().expect("tempdir");
    agents(tmp.path())
        .args(["apply", "--workspace-root", "/tmp/ws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--repo-root"));
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = with_templates();
    let ws = tmp.child("ws");

    agents(tmp.path())
        .arg("--templates")
        .arg(tmp.path().join("templates"))
        .arg("setup")
        .arg("--workspace-root")
        .arg(ws.path())
        .arg("--repo-root")
        .arg(ws.child("repo").path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run]"))
        .stdout(predicate::str::contains("AGENT_NOTES_GLOBAL.md"));

    ws.assert(predicate::path::missing());
}

#[test]
fn json_output_is_machine_readable() {
    let tmp = with_templates();
    let ws = tmp.child("ws");

    let output = agents(tmp.path())
        .arg("--templates")
        .arg(tmp.path().join("templates"))
        .arg("apply")
        .arg("--workspace-root")
        .arg(ws.path())
        .arg("--repo-root")
        .arg(ws.child("repo").path())
        .arg("--json")
        .output()
        .expect("run agents");
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(reports.as_array().map(Vec::len), Some(1));
    assert_eq!(reports[0]["ignore_rules"].as_array().map(Vec::len), Some(3));
    assert_eq!(reports[0]["documents"][0]["result"], "written");
}

#[test]
fn templates_dir_from_environment() {
    let tmp = with_templates();
    let ws = tmp.child("ws");

    agents(tmp.path())
        .env("AGENTS_CONFIG_TEMPLATES", tmp.path().join("templates"))
        .arg("workspace-init")
        .arg("--workspace-root")
        .arg(ws.path())
        .assert()
        .success();

    ws.child("AGENT_NOTES_GLOBAL.md").assert(predicate::path::is_file());
}

#[test]
fn templates_dir_from_config_file() {
    let tmp = with_templates();
    let config_dir = tmp.child(".agents-config");
    config_dir.create_dir_all().expect("mkdir");
    fs::write(
        config_dir.path().join("config.yaml"),
        format!("templates_dir: {}\n", tmp.path().join("templates").display()),
    )
    .expect("write config");

    agents(tmp.path())
        .args(["templates", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            tmp.path().join("templates").display().to_string(),
        ));
}

#[test]
fn validate_passes_with_builtin_templates() {
    let tmp = with_templates();
    agents(tmp.path())
        .arg("--templates")
        .arg(tmp.path().join("templates"))
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup consistency checks passed"));
}

#[test]
fn validate_fails_without_templates() {
    let tmp = TempDir::new().expect("tempdir");
    agents(tmp.path())
        .arg("--templates")
        .arg(tmp.path().join("empty"))
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("agents templates install"));
}
