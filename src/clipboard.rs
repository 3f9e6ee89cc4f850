//! System clipboard access for exported CSS and share links
//!
//! Uses arboard for cross-platform clipboard access

use anyhow::Result;
use arboard::Clipboard;

/// Copy text to system clipboard
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(()); // Nothing to copy
    }

    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// What a copy action tells the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    Stylesheet,
    ShareLink,
}

/// Copy and turn the outcome into a short feedback message. Never fails:
/// a clipboard error only changes the message.
pub fn copy_with_feedback(text: &str, kind: CopyKind) -> &'static str {
    let result = copy(text);
    if let Err(e) = &result {
        tracing::warn!("Clipboard write failed: {}", e);
    }
    feedback(kind, result.is_ok())
}

fn feedback(kind: CopyKind, ok: bool) -> &'static str {
    match (kind, ok) {
        (CopyKind::Stylesheet, true) => "Copied!",
        (CopyKind::Stylesheet, false) => "Copy failed",
        (CopyKind::ShareLink, true) => "Link copied",
        (CopyKind::ShareLink, false) => "URL updated",
    }
}
