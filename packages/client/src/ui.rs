//! Terminal front end: a readline prompt as the form and stdout as the board.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::view::{MessageBoard, TextField};

/// Terminal input field: the line currently submitted from the prompt.
#[derive(Debug, Clone, Default)]
pub struct LineField {
    line: String,
}

impl TextField for LineField {
    fn value(&self) -> String {
        self.line.clone()
    }

    fn set_value(&mut self, value: String) {
        self.line = value;
    }

    fn clear(&mut self) {
        self.line.clear();
    }
}

/// Terminal message board writing each node as its own line.
///
/// Every message is followed by the prompt again.
pub struct TerminalBoard<W = std::io::Stdout> {
    out: W,
    prompt: String,
}

impl TerminalBoard {
    pub fn stdout(prompt: impl Into<String>) -> Self {
        Self::new(std::io::stdout(), prompt)
    }
}

impl<W: Write> TerminalBoard<W> {
    pub fn new(out: W, prompt: impl Into<String>) -> Self {
        Self {
            out,
            prompt: prompt.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MessageBoard for TerminalBoard<W> {
    fn append(&mut self, text: &str) {
        // Start on a fresh line: the prompt is usually still on screen
        let written = write!(self.out, "\n{}\n{}", text, self.prompt).and_then(|_| self.out.flush());
        if let Err(e) = written {
            tracing::warn!("Failed to write message to terminal: {}", e);
        }
    }
}

/// Read lines on a blocking thread and forward each one to `lines`.
///
/// Lines are forwarded verbatim, empty ones included. The thread ends on
/// Ctrl+C, Ctrl+D, a readline error, or when the receiver is dropped; the
/// sender is dropped with it, which closes the channel.
pub fn spawn_prompt(
    prompt: String,
    lines: mpsc::UnboundedSender<String>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if lines.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    })
}
