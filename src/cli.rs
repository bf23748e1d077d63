use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "komet", version, about = "AI commit messages from your staged diff")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a commit message from the staged diff and commit it
    Commit {
        /// Extra guidance appended to the prompt
        #[arg(short, long)]
        context: Option<String>,

        /// Generate and display only, never commit
        #[arg(short = 'd', long)]
        dry_run: bool,

        /// Skip the interactive confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Generate a commit message and copy it to the clipboard
    Copy {
        /// Extra guidance appended to the prompt
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Run the background hotkey daemon (Ctrl+Shift+G copies a message)
    Listen,

    /// Interactive first-run setup (API key and model)
    Setup,
}
