use arboard::Clipboard;

use crate::error::ClipboardError;

/// Put `text` on the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::CopyFailed(e.to_string()))?;

    log::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Text for the acknowledgment dialog shown after a copy attempt
pub fn acknowledgment(result: &Result<(), ClipboardError>) -> (String, Option<String>) {
    match result {
        Ok(()) => ("Coordinates copied to clipboard".to_string(), None),
        Err(e) => ("Could not copy coordinates".to_string(), Some(e.to_string())),
    }
}
