use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn run_git(dir: &Path, args: &[&str]) -> Result<std::process::Output> {
    Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))
}

pub fn is_repo(dir: &Path) -> bool {
    Command::new("git")
        .current_dir(dir)
        .arg("rev-parse")
        .arg("--is-inside-work-tree")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Fetch the staged (index) diff for `dir`.
///
/// Returns `None` when `dir` is not inside a git work tree (or git itself is
/// missing), `Some("")` when the repo has nothing staged, and the trimmed
/// diff text otherwise.
pub fn staged_diff(dir: &Path) -> Result<Option<String>> {
    if !is_repo(dir) {
        return Ok(None);
    }

    let output = run_git(dir, &["diff", "--cached"])?;
    if !output.status.success() {
        // The repo probe passed but the diff query did not. Treat it the same
        // as not-a-repository rather than escalating.
        return Ok(None);
    }

    let diff = String::from_utf8(output.stdout)
        .context("git diff --cached output was not valid UTF-8")?;
    Ok(Some(diff.trim().to_string()))
}

/// Commit the staged changes in `dir` with `message`.
///
/// Uses a temp file + `git commit -F` to reliably preserve multi-line
/// messages.
pub fn commit(dir: &Path, message: &str) -> Result<()> {
    if !is_repo(dir) {
        bail!("Not a git repository (or git is not installed).");
    }

    let mut path: PathBuf = std::env::temp_dir();
    let unique = format!(
        "komet-commit-{}-{}.txt",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis()
    );
    path.push(unique);

    fs::write(&path, message).with_context(|| {
        format!(
            "Failed to write temp commit message file: {}",
            path.display()
        )
    })?;

    let output = Command::new("git")
        .current_dir(dir)
        .arg("commit")
        .arg("-F")
        .arg(&path)
        .output()
        .context("Failed to execute git commit");

    // Best-effort cleanup (ignore errors)
    let _ = fs::remove_file(&path);

    let output = output?;
    if !output.status.success() {
        bail!(
            "git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(())
}
