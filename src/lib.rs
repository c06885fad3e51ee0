// Public modules
pub mod config;
pub mod error;
pub mod history;
pub mod observability;
pub mod render;
pub mod respond;
pub mod shell;

// Re-exports
pub use config::{Config, ConfigLoad};
pub use error::{Error, Result};
pub use history::{Entry, History, Role};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer};
pub use respond::{KeywordResponder, ResponseGenerator, WithFallback};
