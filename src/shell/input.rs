//! Line-oriented input for the shell loop.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::{Error, Result};

/// What one blocking read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A line of text, without its trailing newline.
    Line(String),

    /// The user pressed Ctrl+C while the prompt was waiting.
    Interrupted,

    /// The input stream is closed (Ctrl+D or end of file).
    EndOfInput,
}

/// A source of input lines.
pub trait LineSource {
    /// Blocks until a line, an interrupt or end of input arrives.
    ///
    /// # Errors
    ///
    /// Returns an input error when the source fails in any other way.
    fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = self.add_history_entry(trimmed);
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::EndOfInput),
            Err(err) => Err(Error::input(
                format!("could not read from the terminal: {err}"),
                None,
            )),
        }
    }
}
