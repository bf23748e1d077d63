use std::process::ExitCode;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;

use komet::cli::{Cli, Command};
use komet::clipboard::SystemClipboard;
use komet::config::Config;
use komet::generator::{CommitMessageSource, OpenAIGenerator};
use komet::pipeline::{self, Delivery, Outcome, SystemVcs};
use komet::{listener, setup, ui};

fn main() -> ExitCode {
    // Ensure terminal colors are enabled on Windows
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);

    match run() {
        Ok(code) => code,
        Err(e) => {
            ui::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Commit {
            context,
            dry_run,
            yes,
        } => block_on(cmd_commit(context, dry_run, yes)),
        Command::Copy { context } => block_on(cmd_copy(context)),
        Command::Listen => cmd_listen(),
        Command::Setup => {
            ui::print_banner();
            setup::run_setup()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// One-off runtime for the blocking CLI commands. The listener builds its
/// own inside the worker thread instead.
fn block_on<F, T>(fut: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    rt.block_on(fut)
}

/// Wraps the real generator so the console shows a spinner for the network
/// round trip without the pipeline knowing about the UI.
struct SpinnerSource<'a>(&'a OpenAIGenerator);

#[async_trait]
impl CommitMessageSource for SpinnerSource<'_> {
    async fn generate(&self, diff: &str, context: Option<&str>) -> Result<String> {
        ui::with_spinner("The AI is thinking...", "Message generated", || {
            self.0.generate(diff, context)
        })
        .await
    }
}

async fn cmd_commit(context: Option<String>, dry_run: bool, yes: bool) -> Result<ExitCode> {
    ui::print_banner();

    let config = Config::resolve()?;
    let generator = OpenAIGenerator::from_config(&config);
    let source = SpinnerSource(&generator);
    let vcs = SystemVcs::current_dir()?;

    let mut confirm = |message: &str| -> Result<bool> {
        ui::print_commit_preview(message);
        Ok(cliclack::confirm("Commit with this message?").interact()?)
    };

    let delivery = Delivery::for_commit(dry_run, yes, &mut confirm);
    let outcome = pipeline::run(&vcs, &source, delivery, context.as_deref()).await?;

    if let Some(code) = ui::report_no_work(&outcome) {
        return Ok(code);
    }

    Ok(match outcome {
        Outcome::Preview(message) => {
            ui::print_commit_preview(&message);
            ui::print_outro("Dry run, nothing committed.");
            ExitCode::SUCCESS
        }
        Outcome::Committed(message) => {
            if yes {
                ui::print_commit_preview(&message);
            }
            ui::print_success("Changes committed.");
            ui::print_outro("Done!");
            ExitCode::SUCCESS
        }
        Outcome::Aborted(_) => {
            ui::print_warn("Commit aborted.");
            ui::print_outro("Nothing committed.");
            ExitCode::SUCCESS
        }
        Outcome::Copied(_) => unreachable!("commit mode never delivers to the clipboard"),
        Outcome::NotARepo | Outcome::NoStagedChanges => unreachable!("reported above"),
    })
}

async fn cmd_copy(context: Option<String>) -> Result<ExitCode> {
    ui::print_banner();

    let config = Config::resolve()?;
    let generator = OpenAIGenerator::from_config(&config);
    let source = SpinnerSource(&generator);
    let vcs = SystemVcs::current_dir()?;
    let mut clipboard = SystemClipboard;

    let outcome = pipeline::run(
        &vcs,
        &source,
        Delivery::Clipboard(&mut clipboard),
        context.as_deref(),
    )
    .await?;

    if let Some(code) = ui::report_no_work(&outcome) {
        return Ok(code);
    }

    Ok(match outcome {
        Outcome::Copied(message) => {
            ui::print_commit_preview(&message);
            ui::print_success("Copied to clipboard!");
            ui::print_outro("Done!");
            ExitCode::SUCCESS
        }
        _ => unreachable!("copy mode only delivers to the clipboard"),
    })
}

fn cmd_listen() -> Result<ExitCode> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("komet=info")),
        )
        .init();

    let config = Config::resolve()?;
    listener::run(config)?;
    Ok(ExitCode::SUCCESS)
}
