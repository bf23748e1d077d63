use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::pipeline::ClipboardSink;

/// The real OS clipboard. An unavailable clipboard (headless session, missing
/// display server) is a hard error, not a silent no-op.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Clipboard is not available")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to write to the clipboard")?;
        Ok(())
    }
}
