use crate::config::{Config, DEFAULT_MODEL};
use anyhow::Result;
use cliclack::{input, log, note, password, select};
use colored::*;

/// First-run wizard: collect and store the API credential and model choice.
pub fn run_setup() -> Result<Config> {
    log::info("Welcome! Let's get you set up with a couple of questions.")?;

    let api_key = password("Enter your OpenAI API Key")
        .mask('•')
        .interact()?;

    let model = select_model()?;

    let config = Config {
        api_key,
        model,
        api_base: None,
    };

    config.save()?;

    log::success("Setup complete! You are ready to go.")?;

    note(
        "Quick Start",
        format!(
            "1. Stage your changes:      {}\n2. Generate and commit:     {}\n3. Or copy to clipboard:    {}",
            "git add <files>".cyan(),
            "komet commit".cyan(),
            "komet copy".cyan()
        ),
    )?;

    Ok(config)
}

fn select_model() -> Result<String> {
    let selection = select("Select OpenAI Model")
        .item(DEFAULT_MODEL, "GPT-4o mini", "Fast and cheap, recommended")
        .item("gpt-4o", "GPT-4o", "Stronger reasoning")
        .item("custom", "Other...", "Enter a custom model name")
        .interact()?;

    if selection == "custom" {
        Ok(input("Enter custom model name")
            .placeholder("e.g. gpt-4o-mini")
            .interact()?)
    } else {
        Ok(selection.to_string())
    }
}
