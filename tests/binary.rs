//! The `recordpad` binary driven by a `--script` file

mod common;

use std::process::Command;

use common::temp_file;

#[test]
fn test_script_run_renders_and_saves() {
    let (dir, path) = temp_file("people.csv", b"name,age\nAnn,31\nBo,4\n");
    let script = dir.path().join("session.script");
    std::fs::write(&script, "set 1 2 32\nshow\nquit\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_recordpad"))
        .arg(&path)
        .arg("--script")
        .arg(&script)
        .arg("--no-system-clipboard")
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Initial screen plus the one requested by `show`
    assert_eq!(stdout.matches("people.csv [CSV]").count(), 2);
    assert!(stdout.contains("Ann  | 32"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "name,age\nAnn,32\nBo,4\n"
    );
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_recordpad"))
        .arg(dir.path().join("nope.csv"))
        .arg("--no-system-clipboard")
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to open"));
}
