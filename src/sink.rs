//! Where copied references and user-facing messages go.

/// Clipboard and notification surface of the host editor.
pub trait Sink {
    /// Put `text` on the clipboard.
    fn set_clipboard_text(&mut self, text: &str);

    /// Show the user a short message.
    fn notify(&mut self, message: &str);
}

/// Sink for the command line: clipboard text to stdout, notices to stderr.
#[derive(Default)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn set_clipboard_text(&mut self, text: &str) {
        println!("{text}");
    }

    fn notify(&mut self, message: &str) {
        tracing::warn!("{message}");
        eprintln!("{message}");
    }
}
