//! Background hotkey daemon: global key events in, commit message on the
//! clipboard out.
//!
//! Layout mirrors the rest of the crate: `chord` owns the pure key-state
//! machine, this module wires it to the OS event stream and a worker thread.
//! The rdev callback must never block on the network, so chord fires are
//! handed to the worker through a rendezvous channel; fires that land while
//! a pipeline run is in flight are dropped rather than queued.

pub mod chord;

use std::io::Write;
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use rdev::{listen, Event, EventType, Key};

use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::generator::OpenAIGenerator;
use crate::pipeline::{self, Delivery, Outcome, SystemVcs};
use chord::{ChordKey, ChordTracker};

/// Fold the OS key into its logical chord key, if it belongs to the chord.
fn chord_key(key: Key) -> Option<ChordKey> {
    match key {
        Key::ControlLeft | Key::ControlRight => Some(ChordKey::Control),
        Key::ShiftLeft | Key::ShiftRight => Some(ChordKey::Shift),
        Key::KeyG => Some(ChordKey::KeyG),
        _ => None,
    }
}

/// Run the listener until the process is terminated.
pub fn run(config: Config) -> Result<()> {
    let generator = OpenAIGenerator::from_config(&config);

    // Rendezvous channel: try_send only succeeds while the worker is idle.
    let (tx, rx) = mpsc::sync_channel::<()>(0);

    let worker = thread::Builder::new()
        .name("komet-pipeline".into())
        .spawn(move || worker_loop(rx, generator))
        .context("Failed to spawn pipeline worker thread")?;

    tracing::info!("listening for Ctrl+Shift+G");

    let mut tracker = ChordTracker::new();
    let result = listen(move |event: Event| match event.event_type {
        EventType::KeyPress(key) => {
            if let Some(ck) = chord_key(key) {
                if tracker.press(ck) {
                    // Worker busy means a run is already in flight; coalesce.
                    if tx.try_send(()).is_err() {
                        tracing::debug!("chord fired during an active run, dropped");
                    }
                }
            }
        }
        EventType::KeyRelease(key) => {
            if let Some(ck) = chord_key(key) {
                tracker.release(ck);
            }
        }
        _ => {}
    });

    drop(worker);
    result.map_err(|e| anyhow!("Global key listener failed: {:?}", e))
}

fn worker_loop(rx: mpsc::Receiver<()>, generator: OpenAIGenerator) {
    // One runtime for the lifetime of the worker; each chord fire blocks
    // this thread, never the event callback.
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create runtime: {e:#}");
            return;
        }
    };

    while rx.recv().is_ok() {
        tracing::info!("chord complete, generating commit message");
        match runtime.block_on(run_once(&generator)) {
            Ok(Outcome::Copied(message)) => {
                tracing::info!("copied to clipboard:\n{message}");
                ring_bell();
            }
            Ok(Outcome::NotARepo) => {
                tracing::warn!("not a git repository, nothing to do");
            }
            Ok(Outcome::NoStagedChanges) => {
                tracing::warn!("no staged changes, nothing to do");
            }
            Ok(_) => {}
            // The listener stays alive across failed runs.
            Err(e) => tracing::error!("pipeline run failed: {e:#}"),
        }
    }
}

async fn run_once(generator: &OpenAIGenerator) -> Result<Outcome> {
    let vcs = SystemVcs::current_dir()?;
    let mut clipboard = SystemClipboard;
    pipeline::run(&vcs, generator, Delivery::Clipboard(&mut clipboard), None).await
}

/// Terminal bell as the completion signal, if a terminal is attached.
fn ring_bell() {
    print!("\x07");
    let _ = std::io::stdout().flush();
}
