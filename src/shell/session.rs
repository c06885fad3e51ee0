//! Core chat session management.
//!
//! A [`ChatSession`] owns everything one conversation needs: the merged
//! configuration, the bounded history and the response generator. It handles
//! one line of input at a time and tracks whether the shell is still running.

use crate::config::Config;
use crate::history::{History, Role};
use crate::observability::{SHELL_COMMANDS, SHELL_TURNS, SHELL_UNKNOWN_COMMANDS};
use crate::render::Renderer;
use crate::respond::ResponseGenerator;
use crate::shell::commands::{HELP_ENTRIES, ShellCommand, parse_command};

/// Shown by `/history` when there is nothing to list.
pub const NO_HISTORY_MESSAGE: &str = "No hay historial de conversación.";

/// Shown after `/clear`.
pub const CLEARED_MESSAGE: &str = "Historial de conversación limpiado.";

/// Shown when the shell exits gracefully.
pub const FAREWELL_MESSAGE: &str = "¡Hasta luego! Gracias por usar Mi Sistema GPT.";

/// Points the user at `/help`.
pub const HELP_HINT: &str = "Usa '/help' para ver los comandos disponibles.";

/// The two states of the shell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShellState {
    /// Waiting for, or processing, input.
    Running,

    /// Finished; no further input is read.
    Terminated,
}

/// A chat session: configuration, bounded history and a response generator.
pub struct ChatSession<G: ResponseGenerator> {
    config: Config,
    history: History,
    generator: G,
    state: ShellState,
}

impl<G: ResponseGenerator> ChatSession<G> {
    /// Creates a new running session; the history bound comes from `config`.
    pub fn new(config: Config, generator: G) -> Self {
        let history = History::new(config.max_history());
        Self {
            config,
            history,
            generator,
            state: ShellState::Running,
        }
    }

    /// Prints the banner and the welcome lines.
    pub fn greet(&self, renderer: &mut dyn Renderer) {
        renderer.print_banner(self.config.system_name(), self.config.version());
        renderer.print_info("¡Bienvenido a tu sistema personal de IA!");
        renderer.print_hint("Escribe '/help' para ver los comandos disponibles.");
        renderer.print_hint("Escribe '/quit' para salir.");
        renderer.finish_section();
    }

    /// Handles one raw line of input and returns the resulting state.
    ///
    /// Blank lines are ignored. Lines starting with `/` are commands; any
    /// other line is a chat message.
    pub fn handle_line(&mut self, line: &str, renderer: &mut dyn Renderer) -> ShellState {
        if self.state == ShellState::Terminated {
            return self.state;
        }
        let line = line.trim();
        if line.is_empty() {
            return self.state;
        }
        match parse_command(line) {
            Some(command) => self.execute(command, renderer),
            None => {
                self.send(line, renderer);
            }
        }
        self.state
    }

    /// Runs a parsed command.
    pub fn execute(&mut self, command: ShellCommand, renderer: &mut dyn Renderer) {
        SHELL_COMMANDS.click();
        match command {
            ShellCommand::Help => {
                renderer.print_heading("Comandos disponibles:");
                for (command, description) in HELP_ENTRIES {
                    renderer.print_help_entry(command, description);
                }
                renderer.finish_section();
                renderer.print_info("Simplemente escribe tu mensaje para chatear con el sistema.");
                renderer.finish_section();
            }
            ShellCommand::Clear => {
                self.history.clear();
                renderer.print_success(CLEARED_MESSAGE);
                renderer.finish_section();
            }
            ShellCommand::History => {
                if self.history.is_empty() {
                    renderer.print_hint(NO_HISTORY_MESSAGE);
                    return;
                }
                renderer.print_heading("Historial de conversación:");
                for (index, entry) in self.history.iter().enumerate() {
                    renderer.print_history_entry(index + 1, entry);
                }
                renderer.finish_section();
            }
            ShellCommand::Config => {
                renderer.print_heading("Configuración actual:");
                for (key, value) in self.config.iter() {
                    renderer.print_config_entry(key, &value);
                }
                renderer.finish_section();
            }
            ShellCommand::Quit => self.quit(renderer),
            ShellCommand::Unknown(command) => {
                SHELL_UNKNOWN_COMMANDS.click();
                renderer.print_error(&format!("Comando no reconocido: {command}"));
                renderer.print_hint(HELP_HINT);
            }
        }
    }

    /// Records a chat turn and prints the reply.
    ///
    /// The user message is appended before the generator runs, and the reply
    /// after, so each turn adds two entries.
    pub fn send(&mut self, message: &str, renderer: &mut dyn Renderer) -> String {
        SHELL_TURNS.click();
        self.history.append(Role::User, message);
        let reply = self.generator.respond(message, &self.config);
        self.history.append(Role::Assistant, reply.clone());
        renderer.print_reply(&reply);
        renderer.finish_section();
        reply
    }

    /// Prints the farewell and terminates the session.
    pub fn quit(&mut self, renderer: &mut dyn Renderer) {
        if self.state == ShellState::Running {
            renderer.print_success(FAREWELL_MESSAGE);
            self.state = ShellState::Terminated;
        }
    }

    /// Returns the conversation history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Returns true while the session accepts input.
    pub fn is_running(&self) -> bool {
        self.state == ShellState::Running
    }
}
