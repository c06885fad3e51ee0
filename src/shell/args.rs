//! Command-line arguments for the chat shell.

use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::config::config_path;

/// Command-line arguments for the sistema-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Configuration file to merge over the defaults.
    #[arrrg(optional, "Configuration file (default: config.json)", "PATH")]
    pub config: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

impl ChatArgs {
    /// Returns the configuration file to load.
    pub fn config_path(&self) -> PathBuf {
        config_path(self.config.as_deref())
    }

    /// Returns whether output should be colored.
    pub fn use_color(&self) -> bool {
        !self.no_color
    }
}
