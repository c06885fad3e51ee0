//! Interactive chat shell for Mi Sistema GPT.
//!
//! # Usage
//!
//! ```bash
//! # Start with ./config.json if present, defaults otherwise
//! sistema-chat
//!
//! # Use another configuration file (JSON, or YAML by extension)
//! sistema-chat --config ~/.config/sistema.yaml
//!
//! # Disable colors (useful for piping output)
//! sistema-chat --no-color
//! ```
//!
//! # Commands
//!
//! - `/help` - Show available commands
//! - `/clear` - Clear conversation history
//! - `/history` - Show conversation history
//! - `/config` - Show current configuration
//! - `/quit`, `/exit`, `/salir` - Exit
//!
//! Exits with status 0 on quit, Ctrl+C, SIGINT or end of input, and 1 if the
//! terminal cannot be read.

use std::io::{self, IsTerminal};
use std::process::{self, ExitCode};
use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;

use sistema::shell::{self, ChatArgs, ChatSession, FAREWELL_MESSAGE, Interrupt, Termination};
use sistema::{Config, ConfigLoad, Error, KeywordResponder, PlainTextRenderer, Renderer, Result};

/// Main entry point for the sistema-chat application.
fn main() -> ExitCode {
    let (args, _) = ChatArgs::from_command_line_relaxed("sistema-chat [OPTIONS]");
    let mut renderer = PlainTextRenderer::with_color(args.use_color());

    match chat(&args, &mut renderer) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            renderer.print_error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn chat(args: &ChatArgs, renderer: &mut PlainTextRenderer) -> Result<Termination> {
    let ConfigLoad { config, warning } = Config::load(args.config_path());
    if let Some(warning) = warning {
        renderer.print_warning(&format!("Could not load config file ({warning})"));
    }

    let mut session = ChatSession::new(config, KeywordResponder::new());
    let mut editor = DefaultEditor::new()
        .map_err(|err| Error::input(format!("could not open the terminal: {err}"), None))?;
    let interrupt = install_interrupt_handler(args.use_color())?;

    session.greet(renderer);
    let prompt = renderer.prompt();
    shell::run(&mut session, &mut editor, renderer, &prompt, &interrupt)
}

/// Installs the SIGINT handler and returns the state it shares with the loop.
///
/// A terminal prompt sees Ctrl+C itself. A piped read resumes after the signal,
/// so when the loop is blocked on one the handler says goodbye and exits 0.
fn install_interrupt_handler(use_color: bool) -> Result<Arc<Interrupt>> {
    let interrupt = Arc::new(Interrupt::new());
    let handler = Arc::clone(&interrupt);
    let piped = !io::stdin().is_terminal();
    ctrlc::set_handler(move || {
        if handler.request() && piped {
            PlainTextRenderer::with_color(use_color).print_success(FAREWELL_MESSAGE);
            process::exit(0);
        }
    })
    .map_err(|err| Error::io("could not install the interrupt handler", io::Error::other(err)))?;
    Ok(interrupt)
}
