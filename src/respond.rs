//! Response generation.
//!
//! The shell does not care where replies come from. Anything implementing
//! [`ResponseGenerator`] can answer a chat message, and the generator must
//! always produce a reply. [`KeywordResponder`] is the built-in table of
//! canned replies. [`WithFallback`] adapts a generator that can fail into
//! one that cannot.

use crate::config::Config;
use crate::error::Result;
use crate::observability::RESPOND_FALLBACKS;

/// Reply used by [`WithFallback`] when the wrapped generator fails.
pub const FALLBACK_REPLY: &str =
    "Lo siento, no pude generar una respuesta en este momento. Inténtalo de nuevo.";

/// Produces a reply for a chat message.
pub trait ResponseGenerator {
    /// Returns the reply to `message`.
    fn respond(&self, message: &str, config: &Config) -> String;
}

impl<F> ResponseGenerator for F
where
    F: Fn(&str, &Config) -> String,
{
    fn respond(&self, message: &str, config: &Config) -> String {
        self(message, config)
    }
}

/// The kind of canned reply a message triggers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Intent {
    Greeting,
    Wellbeing,
    Identity,
    Help,
    Thanks,
    Farewell,
}

/// Checked in order; the first intent with a matching keyword wins.
const KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &["hola", "hello", "hi", "buenos días", "buenas tardes"],
    ),
    (
        Intent::Wellbeing,
        &["cómo estás", "how are you", "¿cómo te sientes?"],
    ),
    (
        Intent::Identity,
        &["nombre", "name", "quién eres", "who are you"],
    ),
    (Intent::Help, &["ayuda", "help", "qué puedes hacer"]),
    (Intent::Thanks, &["gracias", "thank you", "thanks"]),
    (
        Intent::Farewell,
        &["adiós", "goodbye", "bye", "hasta luego"],
    ),
];

/// Answers from a fixed keyword table.
///
/// Matching is a case-insensitive substring test, so short keywords such as
/// `hi` also match inside longer words.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordResponder;

impl KeywordResponder {
    /// Creates a new keyword responder.
    pub fn new() -> Self {
        Self
    }

    fn classify(message: &str) -> Option<Intent> {
        let lower = message.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|word| lower.contains(word)))
            .map(|(intent, _)| *intent)
    }
}

impl ResponseGenerator for KeywordResponder {
    fn respond(&self, message: &str, config: &Config) -> String {
        match Self::classify(message) {
            Some(Intent::Greeting) => {
                "¡Hola! Soy tu asistente personal de IA. ¿En qué puedo ayudarte hoy?".to_string()
            }
            Some(Intent::Wellbeing) => {
                "¡Estoy funcionando perfectamente! Gracias por preguntar. ¿Cómo puedo asistirte?"
                    .to_string()
            }
            Some(Intent::Identity) => format!(
                "Soy {}, tu sistema personal de inteligencia artificial.",
                config.system_name()
            ),
            Some(Intent::Help) => "Puedo ayudarte con conversaciones, responder preguntas, y \
                 asistirte en diversas tareas. Usa '/help' para ver los comandos disponibles."
                .to_string(),
            Some(Intent::Thanks) => {
                "¡De nada! Estoy aquí para ayudarte cuando lo necesites.".to_string()
            }
            Some(Intent::Farewell) => {
                "¡Hasta luego! Ha sido un placer ayudarte. Vuelve cuando quieras.".to_string()
            }
            None => format!(
                "He recibido tu mensaje: '{message}'. En una implementación completa, esto se \
                 procesaría con un modelo de IA real. ¿Hay algo específico en lo que pueda \
                 ayudarte?"
            ),
        }
    }
}

/// Wraps a fallible generator and replies with [`FALLBACK_REPLY`] when it
/// fails.
pub struct WithFallback<F> {
    generate: F,
}

impl<F> WithFallback<F>
where
    F: Fn(&str, &Config) -> Result<String>,
{
    /// Creates a new fallback adapter around `generate`.
    pub fn new(generate: F) -> Self {
        Self { generate }
    }
}

impl<F> ResponseGenerator for WithFallback<F>
where
    F: Fn(&str, &Config) -> Result<String>,
{
    fn respond(&self, message: &str, config: &Config) -> String {
        match (self.generate)(message, config) {
            Ok(reply) => reply,
            Err(_) => {
                RESPOND_FALLBACKS.click();
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
