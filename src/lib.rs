//! komet: AI commit messages from your staged diff.
//!
//! The binary drives one pipeline (staged diff -> completion endpoint ->
//! delivery) from two triggers: an explicit CLI invocation and a global
//! hotkey daemon that delivers to the clipboard.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod generator;
pub mod git;
pub mod listener;
pub mod pipeline;
pub mod setup;
pub mod ui;
