//! Output rendering for the chat shell.
//!
//! The shell never prints directly. Every piece of output goes through a
//! [`Renderer`], one method per kind of output, so a renderer can style,
//! reorder or capture it. [`PlainTextRenderer`] writes to the terminal with
//! optional ANSI colors.

use std::io::{self, Stdout, Write};

use crate::history::{Entry, Role};

/// ANSI escape code for cyan text (used for the banner and welcome text).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for white text (used for the banner title).
const ANSI_WHITE: &str = "\x1b[37m";

/// ANSI escape code for yellow text (used for hints and warnings).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for headings and confirmations).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for blue text (used for user entries and the prompt).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for magenta text (used for assistant entries and replies).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Column width of the command names in the help listing.
const HELP_COMMAND_WIDTH: usize = 9;

/// Inner width of the banner box, in characters.
const BANNER_WIDTH: usize = 38;

/// Label printed in front of every reply.
pub const REPLY_LABEL: &str = "Sistema:";

/// Prompt shown while waiting for input.
pub const PROMPT: &str = "Tú: ";

/// Trait for rendering shell output.
///
/// Calls arrive in the order the output must appear.
pub trait Renderer {
    /// Print the startup banner.
    fn print_banner(&mut self, system_name: &str, version: &str);

    /// Print a line of welcome or explanatory text.
    fn print_info(&mut self, info: &str);

    /// Print a section heading.
    fn print_heading(&mut self, heading: &str);

    /// Print a confirmation that something happened.
    fn print_success(&mut self, message: &str);

    /// Print a hint about what to do next.
    fn print_hint(&mut self, hint: &str);

    /// Print a generated reply.
    fn print_reply(&mut self, reply: &str);

    /// Print one history entry. `index` is 1-based.
    fn print_history_entry(&mut self, index: usize, entry: &Entry);

    /// Print one command of the help listing.
    fn print_help_entry(&mut self, command: &str, description: &str);

    /// Print one configuration pair.
    fn print_config_entry(&mut self, key: &str, value: &str);

    /// Print a warning.
    fn print_warning(&mut self, warning: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Called after a block of related output is complete.
    fn finish_section(&mut self);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Returns the prompt, styled if colors are enabled.
    pub fn prompt(&self) -> String {
        self.paint(ANSI_BLUE, PROMPT)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_color {
            format!("{color}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    fn help_entry(&self, command: &str, description: &str) -> String {
        let command = self.paint(ANSI_YELLOW, &format!("{command:<HELP_COMMAND_WIDTH$}"));
        format!("  {command} - {description}")
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.stdout, "{text}");
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_banner(&mut self, system_name: &str, version: &str) {
        let rule = "═".repeat(BANNER_WIDTH);
        let rows = [
            (ANSI_WHITE, system_name.to_uppercase()),
            (ANSI_YELLOW, "Tu Asistente Personal de IA".to_string()),
            (ANSI_GREEN, format!("Versión {version}")),
        ];
        let top = self.paint(ANSI_CYAN, &format!("╔{rule}╗"));
        self.line(&top);
        for (color, text) in rows {
            let centered = format!("{text:^BANNER_WIDTH$}");
            let row = if self.use_color {
                format!("{ANSI_CYAN}║{color}{centered}{ANSI_CYAN}║{ANSI_RESET}")
            } else {
                format!("║{centered}║")
            };
            self.line(&row);
        }
        let bottom = self.paint(ANSI_CYAN, &format!("╚{rule}╝"));
        self.line(&bottom);
        self.line("");
    }

    fn print_info(&mut self, info: &str) {
        let text = self.paint(ANSI_CYAN, info);
        self.line(&text);
    }

    fn print_heading(&mut self, heading: &str) {
        let text = self.paint(ANSI_GREEN, heading);
        self.line(&text);
    }

    fn print_success(&mut self, message: &str) {
        let text = self.paint(ANSI_GREEN, message);
        self.line(&text);
    }

    fn print_hint(&mut self, hint: &str) {
        let text = self.paint(ANSI_YELLOW, hint);
        self.line(&text);
    }

    fn print_reply(&mut self, reply: &str) {
        let label = self.paint(ANSI_MAGENTA, REPLY_LABEL);
        self.line(&format!("{label} {reply}"));
    }

    fn print_history_entry(&mut self, index: usize, entry: &Entry) {
        let color = match entry.role {
            Role::User => ANSI_BLUE,
            Role::Assistant => ANSI_MAGENTA,
        };
        let label = self.paint(color, &format!("{index}. {}:", entry.role));
        self.line(&format!("{label} {}", entry.content));
    }

    fn print_help_entry(&mut self, command: &str, description: &str) {
        let text = self.help_entry(command, description);
        self.line(&text);
    }

    fn print_config_entry(&mut self, key: &str, value: &str) {
        let label = self.paint(ANSI_YELLOW, &format!("{key}:"));
        self.line(&format!("  {label} {value}"));
    }

    fn print_warning(&mut self, warning: &str) {
        let text = self.paint(ANSI_YELLOW, &format!("Warning: {warning}"));
        self.line(&text);
    }

    fn print_error(&mut self, error: &str) {
        let text = self.paint(ANSI_RED, &format!("Error: {error}"));
        let _ = self.stdout.flush();
        eprintln!("{text}");
    }

    fn finish_section(&mut self) {
        self.line("");
    }
}
