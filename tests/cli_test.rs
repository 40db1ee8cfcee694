// tests/cli_test.rs
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NOTICE: &str = "Not running git integration when project file has been specified, to prevent running git in wrong directory.";

fn project_dir() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Could not create temp dir");
    let path = dir.path().join("Sample.csproj");
    fs::write(
        &path,
        [
            r#"<Project Sdk="Microsoft.NET.Sdk">"#,
            "<PropertyGroup>",
            "<Version>1.2.3</Version>",
            "</PropertyGroup>",
            "</Project>",
            "",
        ]
        .join("\n"),
    )
    .expect("Could not write project file");
    (dir, path)
}

fn tool(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("csproj-version").expect("binary should build");
    cmd.current_dir(dir).env("XDG_CONFIG_HOME", dir);
    cmd
}

/// Runs the tool against an explicit project file, which keeps git out of the picture
fn run_with_file(dir: &Path, path: &Path, args: &[&str]) -> String {
    let output = tool(dir)
        .args(args)
        .arg("-p")
        .arg(path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

fn transcript(current: &str, new: &str) -> String {
    format!(
        "Current version: {}\nNew version: {}\n{}\nSuccessfully set version to {}\n",
        current, new, NOTICE, new
    )
}

#[test]
fn test_shows_the_current_project_version_only() {
    let (dir, path) = project_dir();
    let stdout = run_with_file(dir.path(), &path, &["--show"]);
    assert_eq!(stdout, "Current version: 1.2.3\n");
}

#[test]
fn test_sets_the_correct_version() {
    for new_version in ["1.0.0", "1.5.0", "2.0.0"] {
        let (dir, path) = project_dir();
        let stdout = run_with_file(dir.path(), &path, &["--new-version", new_version]);
        assert_eq!(stdout, transcript("1.2.3", new_version));
    }
}

#[test]
fn test_sets_new_major_minor_patch_versions() {
    for (flag, expected) in [("--major", "2.0.0"), ("--minor", "1.3.0"), ("--patch", "1.2.4")] {
        let (dir, path) = project_dir();
        let stdout = run_with_file(dir.path(), &path, &[flag]);
        assert_eq!(stdout, transcript("1.2.3", expected));
        assert!(fs::read_to_string(&path)
            .unwrap()
            .contains(&format!("<Version>{}</Version>", expected)));
    }
}

#[test]
fn test_sets_correct_prerelease_versions() {
    for channel in ["alpha", "beta", "rc"] {
        let (dir, path) = project_dir();
        let flag = format!("--{}", channel);

        let first = run_with_file(dir.path(), &path, &["--major", &flag]);
        let second = run_with_file(dir.path(), &path, &[&flag]);

        let one = format!("2.0.0-{}.1", channel);
        let two = format!("2.0.0-{}.2", channel);
        assert_eq!(first, transcript("1.2.3", &one));
        assert_eq!(second, transcript(&one, &two));
    }
}

#[test]
fn test_sets_correct_final_version() {
    let (dir, path) = project_dir();
    run_with_file(dir.path(), &path, &["--major", "--rc"]);
    let stdout = run_with_file(dir.path(), &path, &["--final"]);
    assert_eq!(stdout, transcript("2.0.0-rc.1", "2.0.0"));
}

#[test]
fn test_backward_channel_fails_without_writing() {
    let (dir, path) = project_dir();
    run_with_file(dir.path(), &path, &["--major", "--rc"]);
    let before = fs::read_to_string(&path).unwrap();

    let assert = tool(dir.path())
        .args(["--beta", "-p"])
        .arg(&path)
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("cannot bump to beta from a rc version"), "{}", stderr);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_final_with_channel_fails() {
    let (dir, path) = project_dir();
    let assert = tool(dir.path())
        .args(["--final", "--alpha", "-p"])
        .arg(&path)
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("cannot bump channel on a finalized version"));
}

#[test]
fn test_malformed_new_version_fails() {
    let (dir, path) = project_dir();
    let assert = tool(dir.path())
        .args(["--new-version", "1.x", "-p"])
        .arg(&path)
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Minor version number could not be parsed."));
}

#[test]
fn test_missing_project_file_fails() {
    let dir = TempDir::new().unwrap();
    let assert = tool(dir.path()).arg("--patch").assert().failure().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Unable to find a project file."));
}

#[test]
fn test_ambiguous_project_file_fails() {
    let (dir, _) = project_dir();
    fs::write(dir.path().join("Other.csproj"), "<Project></Project>").unwrap();
    let assert = tool(dir.path()).arg("--patch").assert().failure().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("more than one project file"));
}

#[test]
fn test_discovers_project_file_with_no_git() {
    let (dir, path) = project_dir();
    let assert = tool(dir.path()).args(["--patch", "--no-git"]).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(
        stdout,
        "Current version: 1.2.3\nNew version: 1.2.4\nSuccessfully set version to 1.2.4\n"
    );
    assert!(fs::read_to_string(&path).unwrap().contains("<Version>1.2.4</Version>"));
}

#[test]
fn test_explicit_project_file_with_no_git_has_no_notice() {
    let (dir, path) = project_dir();
    let assert = tool(dir.path())
        .arg("--patch")
        .arg("-p")
        .arg(&path)
        .arg("--no-git")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(
        stdout,
        "Current version: 1.2.3\nNew version: 1.2.4\nSuccessfully set version to 1.2.4\n"
    );
}

#[test]
fn test_prompts_when_no_directive_given() {
    let (dir, path) = project_dir();
    let assert = tool(dir.path())
        .arg("-p")
        .arg(&path)
        .write_stdin("3.1.0\n")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(stdout, format!("Version number: {}", transcript("1.2.3", "3.1.0")));
}

#[test]
fn test_empty_prompt_answer_fails() {
    let (dir, path) = project_dir();
    let assert = tool(dir.path())
        .arg("-p")
        .arg(&path)
        .write_stdin("")
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Version string can not be empty."));
}

#[test]
fn test_tool_version_flag() {
    let dir = TempDir::new().unwrap();
    let assert = tool(dir.path()).arg("-V").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
