use std::io::Write;
use tracing::debug;

/// Sink for user-visible shell output
pub trait Console {
    /// Print one line of output
    fn notify(&mut self, text: &str);

    /// Show the input prompt. Defaults to a regular line.
    fn prompt(&mut self, text: &str) {
        self.notify(text);
    }
}

/// Collects output lines, used by tests and embedders
impl Console for Vec<String> {
    fn notify(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// Console over any writer, normally stdout
pub struct WriterConsole<W: Write> {
    out: W,
}

impl<W: Write> WriterConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Console for WriterConsole<W> {
    fn notify(&mut self, text: &str) {
        // A closed stdout must not abort the shell
        if let Err(e) = writeln!(self.out, "{text}") {
            debug!("Console write failed: {e}");
        }
    }

    fn prompt(&mut self, text: &str) {
        if let Err(e) = write!(self.out, "{text}").and_then(|()| self.out.flush()) {
            debug!("Console write failed: {e}");
        }
    }
}
