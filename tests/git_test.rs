//! Diff source and commit execution against real throwaway git repos.

use std::path::Path;
use std::process::Command;

use komet::git;
use tempfile::TempDir;

fn git_in(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo(dir: &Path) {
    git_in(dir, &["init"]);
    git_in(dir, &["config", "user.email", "test@example.com"]);
    git_in(dir, &["config", "user.name", "Test"]);
}

#[test]
fn staged_diff_is_absent_outside_a_repo() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(git::staged_diff(tmp.path()).unwrap(), None);
}

#[test]
fn staged_diff_is_empty_when_nothing_is_staged() {
    let tmp = TempDir::new().unwrap();
    init_repo(tmp.path());

    assert_eq!(git::staged_diff(tmp.path()).unwrap(), Some(String::new()));

    // An unstaged file still does not count.
    std::fs::write(tmp.path().join("x.txt"), "hello\n").unwrap();
    assert_eq!(git::staged_diff(tmp.path()).unwrap(), Some(String::new()));
}

#[test]
fn staged_diff_returns_the_index_diff() {
    let tmp = TempDir::new().unwrap();
    init_repo(tmp.path());

    std::fs::write(tmp.path().join("x.txt"), "hello\n").unwrap();
    git_in(tmp.path(), &["add", "x.txt"]);

    let diff = git::staged_diff(tmp.path()).unwrap().unwrap();
    assert!(diff.contains("x.txt"), "diff should name the file: {diff}");
    assert!(diff.contains("+hello"), "diff should show the added line: {diff}");
    // Trimmed of surrounding whitespace.
    assert_eq!(diff, diff.trim());
}

#[test]
fn commit_preserves_a_multi_line_message() {
    let tmp = TempDir::new().unwrap();
    init_repo(tmp.path());

    std::fs::write(tmp.path().join("x.txt"), "hello\n").unwrap();
    git_in(tmp.path(), &["add", "x.txt"]);

    let message = "feat(core): add hello\n\n- introduce x.txt\n- seed the greeting";
    git::commit(tmp.path(), message).unwrap();

    let output = Command::new("git")
        .current_dir(tmp.path())
        .args(["log", "-1", "--pretty=%B"])
        .output()
        .unwrap();
    let logged = String::from_utf8(output.stdout).unwrap();
    assert_eq!(logged.trim_end(), message);

    // Nothing left in the index afterwards.
    assert_eq!(git::staged_diff(tmp.path()).unwrap(), Some(String::new()));
}

#[test]
fn commit_outside_a_repo_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(git::commit(tmp.path(), "feat: nope").is_err());
}
