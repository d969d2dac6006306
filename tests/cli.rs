use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn limn() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_limn"));
    // keep ambient credentials and any .env in the workspace out of tests
    cmd.env_remove("OPENAI_API_KEY");
    cmd
}

#[test]
fn cli_requires_api_key() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("src/main.rs"), "fn main() {}\n");

    let output = limn()
        .current_dir(dir.path())
        .arg(dir.path().to_str().unwrap())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("OpenAI API key required"));
}

#[test]
fn cli_rejects_nonexistent_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("no-such-repo");

    let output = limn()
        .current_dir(dir.path())
        .args([
            missing.to_str().unwrap(),
            "--api-key",
            "sk-test-not-a-real-key",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to scan directory"));
}

#[test]
fn cli_rejects_unknown_format() {
    let dir = tempdir().unwrap();

    let output = limn()
        .current_dir(dir.path())
        .args([".", "--format", "svg"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("svg"));
}

#[test]
fn cli_help_lists_flags() {
    let output = limn().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--instructions"));
    assert!(stdout.contains("--no-click"));
}
