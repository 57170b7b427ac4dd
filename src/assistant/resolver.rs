use crate::assistant::intent::classify;
use crate::assistant::registry::ServiceRegistry;
use crate::assistant::responses::{canned_response, gating_message};

/// Produces the assistant's reply for one user message. Pure: same text
/// and same registry state always give the same reply. Callers must
/// filter out empty input before calling.
///
/// Gating beats content: if any required service is not connected the
/// reply asks for those services and the topic reply is withheld.
pub fn resolve(text: &str, registry: &ServiceRegistry) -> String {
    let classification = classify(text);
    let missing = registry.missing(&classification.required);

    if !missing.is_empty() {
        return gating_message(&missing);
    }

    canned_response(classification.topic).to_string()
}
