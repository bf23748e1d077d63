use cliclack::{intro, log, outro, spinner};
use colored::*;
use std::future::Future;
use std::process::ExitCode;

use crate::pipeline::Outcome;

pub const NOT_A_REPO: &str = "Not a git repository.";
pub const NO_STAGED_CHANGES: &str = "No staged changes found. Did you forget to 'git add'?";

pub fn print_banner() {
    intro(" KOMET ").ok();
    log::remark("AI commit messages from your staged diff").ok();
}

pub fn print_success(message: &str) {
    log::success(message).ok();
}

pub fn print_error(message: &str) {
    log::error(message).ok();
}

pub fn print_warn(message: &str) {
    log::warning(message).ok();
}

pub fn print_commit_preview(message: &str) {
    println!();
    println!("  {}", "┌  Generated Commit Message".dimmed());
    for line in message.lines() {
        println!("  {}  {}", "│".dimmed(), line.cyan());
    }
    println!("  {}", "└──────────────────────────".dimmed());
    println!();
}

pub fn print_outro(msg: &str) {
    outro(msg).ok();
}

/// Shared reporting for runs that stop before generation, so the wording
/// cannot drift between `commit` and `copy`.
pub fn report_no_work(outcome: &Outcome) -> Option<ExitCode> {
    match outcome {
        Outcome::NotARepo => {
            print_error(NOT_A_REPO);
            print_outro("Nothing to do.");
            Some(ExitCode::FAILURE)
        }
        Outcome::NoStagedChanges => {
            print_warn(NO_STAGED_CHANGES);
            print_outro("Nothing to do.");
            Some(ExitCode::FAILURE)
        }
        _ => None,
    }
}

pub async fn with_spinner<F, Fut, T, E>(start_msg: &str, success_msg: &str, f: F) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let s = spinner();
    s.start(start_msg);
    let result = f().await;
    match &result {
        Ok(_) => s.stop(success_msg),
        Err(_) => s.stop("Failed"),
    }
    result
}
