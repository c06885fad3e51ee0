//! Slash command parsing for the chat shell.
//!
//! Input that starts with `/` is a command and never reaches the response
//! generator. The command table is fixed; matching ignores case but is
//! otherwise exact, so `/help me` is an unknown command rather than `/help`.

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Display help information.
    Help,

    /// Clear the conversation history.
    Clear,

    /// List the conversation history.
    History,

    /// Show the current configuration.
    Config,

    /// Exit the shell.
    Quit,

    /// Anything else; carries the normalized command text.
    Unknown(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ShellCommand)` for any input starting with `/` (after
/// trimming), or `None` if it should be treated as a chat message.
///
/// # Examples
///
/// ```
/// # use sistema::shell::{ShellCommand, parse_command};
/// assert_eq!(parse_command("/QUIT"), Some(ShellCommand::Quit));
/// assert_eq!(parse_command("/salir"), Some(ShellCommand::Quit));
/// assert_eq!(parse_command("/foo"), Some(ShellCommand::Unknown("foo".to_string())));
/// assert!(parse_command("Hola").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ShellCommand> {
    let command = input.trim().strip_prefix('/')?.to_lowercase();
    let command = command.trim();

    let result = match command {
        "help" => ShellCommand::Help,
        "clear" => ShellCommand::Clear,
        "history" => ShellCommand::History,
        "config" => ShellCommand::Config,
        "quit" | "exit" | "salir" => ShellCommand::Quit,
        other => ShellCommand::Unknown(other.to_string()),
    };

    Some(result)
}

/// The commands shown by `/help`, as `(command, description)` pairs.
pub const HELP_ENTRIES: &[(&str, &str)] = &[
    ("/help", "Mostrar esta ayuda"),
    ("/clear", "Limpiar historial de conversación"),
    ("/history", "Mostrar historial de conversación"),
    ("/config", "Mostrar configuración actual"),
    ("/quit", "Salir del sistema"),
];
