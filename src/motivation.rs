//! Motivational messages handed out when a task is completed.
//!
//! The list is fixed; one entry is chosen uniformly at random per call. The
//! provider is stateless apart from the thread-local random source, so a
//! single instance is shared across workers via `web::Data`.

use rand::seq::SliceRandom;

/// The fixed message list. Tests assert membership in this set, never an
/// exact sequence: selection is intentionally unseeded.
pub const MESSAGES: [&str; 7] = [
    "¡Excelente trabajo! Sigue así.",
    "¡Tarea completada! Eres imparable.",
    "¡Un paso más cerca de tus metas!",
    "¡Bien hecho! Cada tarea cuenta.",
    "¡Fantástico! Tu esfuerzo da frutos.",
    "¡Lo lograste! Tómate un respiro.",
    "¡Increíble! Sigue conquistando tus tareas.",
];

/// Returned when the message list is empty.
pub const FALLBACK_MESSAGE: &str = "¡Sigue adelante!";

#[derive(Debug, Clone, Default)]
pub struct MotivationService;

impl MotivationService {
    /// Returns one of the fixed messages, chosen uniformly at random.
    pub fn random_message(&self) -> &'static str {
        pick(&MESSAGES)
    }
}

fn pick(messages: &[&'static str]) -> &'static str {
    messages
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_MESSAGE)
}
