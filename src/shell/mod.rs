//! Interactive chat shell.
//!
//! This module provides the read-dispatch loop behind `sistema-chat`:
//!
//! - Slash commands for inspecting and clearing the session
//! - Chat messages answered by a pluggable response generator
//! - A bounded history of every chat turn
//!
//! # Architecture
//!
//! - [`args`]: CLI argument parsing
//! - [`commands`]: Slash command parsing
//! - [`session`]: Per-line dispatch and session state
//! - [`input`]: The blocking line source the loop reads from
//! - [`interrupt`]: Interrupt requests shared with a signal handler
//!
//! The loop has two states. It starts running and terminates on a quit
//! command, an interrupt, or the end of input; only an input failure ends it
//! with an error.

mod args;
mod commands;
mod input;
mod interrupt;
mod session;

use crate::error::Result;
use crate::observability::SHELL_INTERRUPTS;
use crate::render::Renderer;
use crate::respond::ResponseGenerator;

pub use args::ChatArgs;
pub use commands::{HELP_ENTRIES, ShellCommand, parse_command};
pub use input::{Input, LineSource};
pub use interrupt::Interrupt;
pub use session::{
    CLEARED_MESSAGE, ChatSession, FAREWELL_MESSAGE, HELP_HINT, NO_HISTORY_MESSAGE, ShellState,
};

/// Why the loop stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Termination {
    /// A quit command was entered.
    Quit,

    /// The user interrupted the shell.
    Interrupted,

    /// The input stream closed.
    EndOfInput,
}

/// Reads and dispatches lines until the session terminates.
///
/// A pending `interrupt` is consumed before every read and again after the
/// read returns; either way the session quits as if the user had typed
/// `/quit`, and a line read while the request was pending is discarded.
///
/// # Errors
///
/// Returns an error if the line source fails. The session is left running
/// and nothing is printed; reporting is up to the caller.
pub fn run<G, S>(
    session: &mut ChatSession<G>,
    input: &mut S,
    renderer: &mut dyn Renderer,
    prompt: &str,
    interrupt: &Interrupt,
) -> Result<Termination>
where
    G: ResponseGenerator,
    S: LineSource + ?Sized,
{
    while session.is_running() {
        if interrupt.take() {
            return Ok(interrupted(session, renderer));
        }
        let read = interrupt.wait(|| input.read_line(prompt))?;
        if interrupt.take() {
            return Ok(interrupted(session, renderer));
        }
        match read {
            Input::Line(line) => {
                session.handle_line(&line, renderer);
            }
            Input::Interrupted => return Ok(interrupted(session, renderer)),
            Input::EndOfInput => {
                session.quit(renderer);
                return Ok(Termination::EndOfInput);
            }
        }
    }
    Ok(Termination::Quit)
}

fn interrupted<G: ResponseGenerator>(
    session: &mut ChatSession<G>,
    renderer: &mut dyn Renderer,
) -> Termination {
    SHELL_INTERRUPTS.click();
    session.quit(renderer);
    Termination::Interrupted
}
