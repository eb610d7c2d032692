//! End-to-end voice navigation against the compiled binary: utterances go
//! in on stdin, reports and directory listings come back out.

use std::fs;
use std::io::Write;
use std::process::{Child, Command, Stdio};

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_handsfree"))
}

fn spawn_voice(root: &std::path::Path) -> Child {
    binary()
        .arg("voice")
        .arg("--root")
        .arg(root)
        // Keep config.toml resolution away from the checkout.
        .current_dir(root)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should start")
}

#[test]
fn navigation_session_moves_and_deletes() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("reports")).unwrap();
    fs::write(root.path().join("reports").join("q1.pdf"), "q1").unwrap();
    fs::write(root.path().join("notes.txt"), "scratch").unwrap();

    let mut child = spawn_voice(root.path());
    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(stdin, "open reports").unwrap();
        writeln!(stdin, "go back").unwrap();
        writeln!(stdin, "delete notes dot txt").unwrap();
        writeln!(stdin, "tell me a joke").unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("heard: open reports"), "stdout: {stdout}");
    assert!(stdout.contains("q1.pdf"), "stdout: {stdout}");
    assert!(stdout.contains("moved back to"), "stdout: {stdout}");
    assert!(stdout.contains("deleted 'notes.txt'"), "stdout: {stdout}");
    assert!(!root.path().join("notes.txt").exists());
    assert!(root.path().join("reports").join("q1.pdf").exists());
}

#[test]
fn failures_are_reported_without_aborting() {
    let root = tempfile::tempdir().unwrap();

    let mut child = spawn_voice(root.path());
    {
        let mut stdin = child.stdin.take().unwrap();
        writeln!(stdin, "open nothing here").unwrap();
        writeln!(stdin, "go back").unwrap();
        writeln!(stdin).unwrap(); // blank utterance: captured but not understood
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'nothing here' not found"), "stderr: {stderr}");
    assert!(stderr.contains("no folder to go back to"), "stderr: {stderr}");
    assert!(stderr.contains("could not understand"), "stderr: {stderr}");
}

#[test]
fn missing_root_is_fatal_at_startup() {
    let root = tempfile::tempdir().unwrap();

    let output = binary()
        .arg("voice")
        .arg("--root")
        .arg(root.path().join("absent"))
        .current_dir(root.path())
        .stdin(Stdio::null())
        .output()
        .expect("binary should start");

    assert!(!output.status.success());
}
