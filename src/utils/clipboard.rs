use std::io::Write;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::debug;

/// OSC 52 "set clipboard" sequence carrying `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Asks the terminal behind `out` to put `text` on the system clipboard.
/// Fire-and-forget: terminals without OSC 52 support silently ignore it and
/// write errors are only logged.
pub fn copy_to_clipboard<W: Write>(out: &mut W, text: &str) {
    let sequence = osc52_sequence(text);
    if let Err(e) = out
        .write_all(sequence.as_bytes())
        .and_then(|_| out.flush())
    {
        debug!("clipboard write failed: {}", e);
    }
}
