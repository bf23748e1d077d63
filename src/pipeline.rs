//! The single diff -> message -> delivery pipeline.
//!
//! Command mode and the hotkey listener run this same flow; they differ only
//! in the [`Delivery`] they hand in. Effects (git, clipboard, the completion
//! endpoint) sit behind small traits so tests can swap in recording doubles.

use anyhow::Result;
use std::path::PathBuf;

use crate::generator::CommitMessageSource;
use crate::git;

/// The version-control side effects the pipeline drives.
pub trait Vcs {
    /// `None` = not a repository; `Some("")` = nothing staged.
    fn staged_diff(&self) -> Result<Option<String>>;
    fn commit(&self, message: &str) -> Result<()>;
}

/// Real git, rooted at an explicit working directory.
pub struct SystemVcs {
    dir: PathBuf,
}

impl SystemVcs {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }
}

impl Vcs for SystemVcs {
    fn staged_diff(&self) -> Result<Option<String>> {
        git::staged_diff(&self.dir)
    }

    fn commit(&self, message: &str) -> Result<()> {
        git::commit(&self.dir, message)
    }
}

pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// Where the generated message goes. Each variant carries what it needs, so
/// a dry run never touches the clipboard or a confirmation prompt.
pub enum Delivery<'a> {
    Clipboard(&'a mut dyn ClipboardSink),
    Commit {
        auto_confirm: bool,
        /// Shown the generated message; returns whether to proceed. Only
        /// consulted when `auto_confirm` is false.
        confirm: &'a mut dyn FnMut(&str) -> Result<bool>,
    },
    DryRun,
}

impl<'a> Delivery<'a> {
    /// Map the `commit` command's flags to a delivery. Dry-run wins over
    /// auto-confirm: `--dry-run --yes` still never commits.
    pub fn for_commit(
        dry_run: bool,
        auto_confirm: bool,
        confirm: &'a mut dyn FnMut(&str) -> Result<bool>,
    ) -> Self {
        if dry_run {
            Delivery::DryRun
        } else {
            Delivery::Commit {
                auto_confirm,
                confirm,
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    NotARepo,
    NoStagedChanges,
    Copied(String),
    Committed(String),
    Aborted(String),
    Preview(String),
}

/// Run one pipeline pass: staged diff -> generated message -> delivery.
///
/// An absent or empty diff short-circuits before the generator is ever
/// consulted. Generator and delivery errors propagate to the caller; nothing
/// is retried.
pub async fn run(
    vcs: &dyn Vcs,
    generator: &dyn CommitMessageSource,
    delivery: Delivery<'_>,
    context: Option<&str>,
) -> Result<Outcome> {
    let diff = match vcs.staged_diff()? {
        None => return Ok(Outcome::NotARepo),
        Some(d) if d.trim().is_empty() => return Ok(Outcome::NoStagedChanges),
        Some(d) => d,
    };

    let message = generator.generate(&diff, context).await?;

    match delivery {
        Delivery::DryRun => Ok(Outcome::Preview(message)),
        Delivery::Clipboard(clipboard) => {
            clipboard.copy(&message)?;
            Ok(Outcome::Copied(message))
        }
        Delivery::Commit {
            auto_confirm,
            confirm,
        } => {
            if !auto_confirm && !confirm(&message)? {
                return Ok(Outcome::Aborted(message));
            }
            vcs.commit(&message)?;
            Ok(Outcome::Committed(message))
        }
    }
}
