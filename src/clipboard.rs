use copypasta_ext::prelude::*;
use tracing::debug;

use crate::errors::ClipboardError;

/// Puts `text` on the system clipboard.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    let mut ctx = copypasta_ext::try_context().ok_or(ClipboardError::NoProvider)?;

    ctx.set_contents(text.to_string())
        .map_err(|e| ClipboardError::Set(e.to_string()))?;
    debug!("copied to clipboard");

    Ok(())
}
