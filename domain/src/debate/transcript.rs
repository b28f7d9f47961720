//! Transcript entities: the ordered message history of a debate

use crate::persona::entities::{Persona, PersonaId};
use serde::{Deserialize, Serialize};

/// Who produced a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The seed / topic announcement
    User,
    /// A persona's completed (or fallback) turn
    Assistant,
    /// The terminal verdict
    Judge,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::Judge => "judge",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single transcript entry
///
/// Serialized with the share-record field names (`branch`, `branchName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMessage {
    pub role: TurnRole,
    pub content: String,
    #[serde(rename = "branch", default, skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<PersonaId>,
    #[serde(rename = "branchName", default, skip_serializing_if = "Option::is_none")]
    pub persona_name: Option<String>,
}

impl TurnMessage {
    /// Topic announcement that opens every debate
    pub fn seed(topic: &str) -> Self {
        Self::user(format!(
            "Tartışma konusu: \"{}\". Seçilen uzmanlar tartışmaya başlıyor...",
            topic
        ))
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            persona_id: None,
            persona_name: None,
        }
    }

    pub fn assistant(persona: &Persona, content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            persona_id: Some(persona.id().clone()),
            persona_name: Some(persona.name().to_string()),
        }
    }

    /// Stand-in for a turn whose every attempt failed
    pub fn fallback(persona: &Persona) -> Self {
        Self::assistant(persona, Self::fallback_text(persona.name()))
    }

    pub fn fallback_text(persona_name: &str) -> String {
        format!("[{} could not respond this turn — system error]", persona_name)
    }

    pub fn judge(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Judge,
            content: content.into(),
            persona_id: None,
            persona_name: None,
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == TurnRole::Assistant
    }

    pub fn is_judge(&self) -> bool {
        self.role == TurnRole::Judge
    }

    /// True for the bracketed system note left by an exhausted turn
    pub fn is_fallback(&self) -> bool {
        match (&self.role, &self.persona_name) {
            (TurnRole::Assistant, Some(name)) => self.content == Self::fallback_text(name),
            _ => false,
        }
    }
}

/// Ordered, append-only message history
///
/// Only the debate session appends; everyone else reads a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<TurnMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, message: TurnMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[TurnMessage] {
        &self.messages
    }

    /// Owned copy handed to the turn generator and adjudicator
    pub fn snapshot(&self) -> Vec<TurnMessage> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&TurnMessage> {
        self.messages.last()
    }

    pub fn assistant_messages(&self) -> impl Iterator<Item = &TurnMessage> {
        self.messages.iter().filter(|m| m.is_assistant())
    }

    pub fn verdict(&self) -> Option<&TurnMessage> {
        self.messages.iter().find(|m| m.is_judge())
    }
}

impl From<Vec<TurnMessage>> for Transcript {
    fn from(messages: Vec<TurnMessage>) -> Self {
        Self { messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physicist() -> Persona {
        Persona::new("physicist", "Physicist", "Studies matter and energy.")
    }

    #[test]
    fn test_seed_contains_topic_verbatim() {
        let seed = TurnMessage::seed("Is AI dangerous?");
        assert_eq!(seed.role, TurnRole::User);
        assert!(seed.content.contains("Is AI dangerous?"));
        assert!(seed.persona_name.is_none());
    }

    #[test]
    fn test_assistant_is_tagged_with_persona() {
        let message = TurnMessage::assistant(&physicist(), "Energy is conserved.");
        assert_eq!(message.persona_id, Some(PersonaId::new("physicist")));
        assert_eq!(message.persona_name.as_deref(), Some("Physicist"));
        assert!(!message.is_fallback());
    }

    #[test]
    fn test_fallback_message() {
        let message = TurnMessage::fallback(&physicist());
        assert!(message.is_assistant());
        assert!(message.is_fallback());
        assert_eq!(
            message.content,
            "[Physicist could not respond this turn — system error]"
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let message = TurnMessage::assistant(&physicist(), "E = mc²");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["branch"], "physicist");
        assert_eq!(json["branchName"], "Physicist");

        let judge = serde_json::to_value(TurnMessage::judge("ok")).unwrap();
        assert_eq!(judge["role"], "judge");
        assert!(judge.get("branchName").is_none());
    }

    #[test]
    fn test_transcript_queries() {
        let mut transcript = Transcript::new();
        transcript.push(TurnMessage::seed("topic"));
        transcript.push(TurnMessage::assistant(&physicist(), "a"));
        transcript.push(TurnMessage::judge("verdict"));
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.assistant_messages().count(), 1);
        assert_eq!(transcript.verdict().unwrap().content, "verdict");
    }
}
