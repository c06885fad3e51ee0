//! Error types for the sistema chat shell.
//!
//! Most failures in the shell are recovered where they happen: a broken
//! configuration file falls back to defaults, an unknown command is reported
//! and the session continues. The variants here cover what is left over, plus
//! the intermediate errors those recovery paths report.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for the sistema chat shell.
#[derive(Clone, Debug)]
pub enum Error {
    /// The configuration source could not be read or understood.
    ConfigLoad {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A configuration value was present but not acceptable.
    Validation {
        /// Human-readable error message.
        message: String,
        /// Key that failed validation.
        param: Option<String>,
    },

    /// Reading a line of user input failed.
    Input {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// A response generator could not produce a reply.
    Generation {
        /// Human-readable error message.
        message: String,
    },

    /// Error during JSON or YAML deserialization.
    Serialization {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// I/O error.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },
}

impl Error {
    /// Creates a new configuration load error.
    pub fn config_load(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::ConfigLoad {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>, param: Option<String>) -> Self {
        Error::Validation {
            message: message.into(),
            param,
        }
    }

    /// Creates a new input error.
    pub fn input(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Input {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Error::Generation {
            message: message.into(),
        }
    }

    /// Creates a new serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Serialization {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Returns true if this error came from loading configuration.
    pub fn is_config_load(&self) -> bool {
        matches!(self, Error::ConfigLoad { .. })
    }

    /// Returns true if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns true if this error came from the input source.
    pub fn is_input(&self) -> bool {
        matches!(self, Error::Input { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigLoad { message, source } => {
                if let Some(source) = source {
                    write!(f, "Configuration error: {message}: {source}")
                } else {
                    write!(f, "Configuration error: {message}")
                }
            }
            Error::Validation { message, param } => {
                if let Some(param) = param {
                    write!(f, "Validation error: {message} (parameter: {param})")
                } else {
                    write!(f, "Validation error: {message}")
                }
            }
            Error::Input { message, .. } => {
                write!(f, "Input error: {message}")
            }
            Error::Generation { message } => {
                write!(f, "Generation error: {message}")
            }
            Error::Serialization { message, .. } => {
                write!(f, "Serialization error: {message}")
            }
            Error::Io { message, .. } => {
                write!(f, "I/O error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::ConfigLoad { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Input { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {err}"), Some(Box::new(err)))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::serialization(format!("YAML error: {err}"), Some(Box::new(err)))
    }
}

/// A specialized Result type for sistema operations.
pub type Result<T> = std::result::Result<T, Error>;
