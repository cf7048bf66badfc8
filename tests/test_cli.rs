use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command running in `dir` with HOME pointed at it, so no user config leaks in
fn cc_manager(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cc-manager"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("CC_MANAGER_CLAUDE_DIR")
        .env_remove("CC_MANAGER_PLUGINS_DIR")
        .env_remove("CC_MANAGER_NO_LOCK")
        .env_remove("CC_MANAGER_LOG");
    cmd
}

#[test]
fn test_help_output() {
    let dir = TempDir::new().unwrap();
    cc_manager(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Manage Claude Code configuration through composable plugins",
        ))
        .stdout(predicate::str::contains("enable"));
}

#[test]
fn test_list_without_plugins_dir() {
    let dir = TempDir::new().unwrap();
    cc_manager(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No plugins found."));
}

#[test]
fn test_plugin_lifecycle() {
    let dir = TempDir::new().unwrap();

    cc_manager(&dir)
        .args(["add", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugin \"foo\" created"));
    assert!(dir.path().join(".claude/plugins/foo/settings.json").exists());

    cc_manager(&dir)
        .args(["enable", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled successfully"));

    cc_manager(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("- foo (enabled)"));

    let doc = fs::read_to_string(dir.path().join(".claude/CLAUDE.md")).unwrap();
    assert!(doc.starts_with("<!-- BEGIN PLUGIN: foo -->\n# foo"));

    // Guard: cannot remove while enabled
    cc_manager(&dir)
        .args(["remove", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("disable \"foo\" first"));
    assert!(dir.path().join(".claude/plugins/foo").is_dir());

    cc_manager(&dir)
        .args(["disable", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled successfully"));

    cc_manager(&dir).args(["remove", "foo"]).assert().success();
    assert!(!dir.path().join(".claude/plugins/foo").exists());
}

#[test]
fn test_soft_no_ops_exit_zero() {
    let dir = TempDir::new().unwrap();
    cc_manager(&dir).args(["add", "foo"]).assert().success();
    cc_manager(&dir).args(["enable", "foo"]).assert().success();

    cc_manager(&dir)
        .args(["enable", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already enabled"));

    cc_manager(&dir).args(["disable", "foo"]).assert().success();
    cc_manager(&dir)
        .args(["disable", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is not enabled"));
}

#[test]
fn test_hard_errors_exit_one() {
    let dir = TempDir::new().unwrap();

    cc_manager(&dir)
        .args(["enable", "missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Plugin \"missing\" not found."));
    assert!(!dir.path().join(".claude").exists());

    cc_manager(&dir)
        .args(["remove", "missing"])
        .assert()
        .code(1);

    cc_manager(&dir).args(["add", "foo"]).assert().success();
    cc_manager(&dir)
        .args(["add", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_disable_missing_directory_is_tolerated() {
    let dir = TempDir::new().unwrap();
    cc_manager(&dir).args(["add", "foo"]).assert().success();
    cc_manager(&dir).args(["enable", "foo"]).assert().success();
    fs::remove_dir_all(dir.path().join(".claude/plugins/foo")).unwrap();

    cc_manager(&dir)
        .args(["disable", "foo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled successfully"));

    let state = fs::read_to_string(dir.path().join(".claude/cc-manager.state.json")).unwrap();
    assert!(!state.contains("foo"));
}

#[test]
fn test_list_commands_shows_linked_resources() {
    let dir = TempDir::new().unwrap();
    cc_manager(&dir).args(["add", "tools"]).assert().success();
    fs::write(
        dir.path().join(".claude/plugins/tools/commands/review.md"),
        "Review the diff",
    )
    .unwrap();
    cc_manager(&dir).args(["enable", "tools"]).assert().success();

    cc_manager(&dir)
        .args(["list", "commands"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- /review [Project]"));
}

#[test]
fn test_project_dir_flag() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("project");
    fs::create_dir_all(&project).unwrap();

    cc_manager(&dir)
        .args(["add", "foo", "--project-dir"])
        .arg(&project)
        .assert()
        .success();
    assert!(project.join(".claude/plugins/foo").is_dir());
}

#[test]
fn test_command_files_add_and_remove() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join(".claude/commands/review.md");

    cc_manager(&dir)
        .args(["command", "add", "review", "-p", "Review the staged diff."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created command:"));
    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "---\ndescription: A custom command for review\n---\n\nReview the staged diff.\n"
    );

    cc_manager(&dir)
        .args(["command", "add", "review"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Command \"review\" already exists."));

    cc_manager(&dir)
        .args(["list", "commands"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- /review [Project]"));

    cc_manager(&dir)
        .args(["command", "remove", "review"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed command:"));
    assert!(!file.exists());

    cc_manager(&dir)
        .args(["command", "remove", "review"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found at"));
}

#[test]
fn test_agent_file_survives_enable_and_disable() {
    let dir = TempDir::new().unwrap();
    cc_manager(&dir)
        .args(["agent", "add", "code-reviewer"])
        .assert()
        .success();
    cc_manager(&dir).args(["add", "foo"]).assert().success();
    cc_manager(&dir).args(["enable", "foo"]).assert().success();
    cc_manager(&dir).args(["disable", "foo"]).assert().success();

    let agent = fs::read_to_string(dir.path().join(".claude/agents/code-reviewer.md")).unwrap();
    assert!(agent.contains("description: A custom agent for code reviewer"));
}
