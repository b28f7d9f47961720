//! Persona entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum length of a generated persona id
const MAX_ID_CHARS: usize = 50;

/// Slug-form identifier of a persona (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaId(String);

impl PersonaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a display name.
    ///
    /// Lowercases, drops everything except letters, ASCII digits and
    /// whitespace, joins words with `-` and keeps at most 50 characters.
    pub fn from_name(name: &str) -> Self {
        let kept: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphabetic() || c.is_ascii_digit() || c.is_whitespace())
            .collect();
        let slug: String = kept
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .chars()
            .take(MAX_ID_CHARS)
            .collect();
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonaId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PersonaId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An expert voice that can occupy a debate slot (Entity)
///
/// Immutable once created. The debate core only ever reads personas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    id: PersonaId,
    name: String,
    description: String,
}

impl Persona {
    pub fn new(
        id: impl Into<PersonaId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Create a user-defined persona whose id is derived from its name.
    pub fn custom(name: &str, description: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidPersona("name cannot be empty".to_string()));
        }
        if description.is_empty() {
            return Err(DomainError::InvalidPersona(format!(
                "description for '{}' cannot be empty",
                name
            )));
        }
        let id = PersonaId::from_name(name);
        if id.is_empty() {
            return Err(DomainError::InvalidPersona(format!(
                "'{}' does not contain any letters or digits",
                name
            )));
        }
        Ok(Self::new(id, name, description))
    }

    pub fn id(&self) -> &PersonaId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Same id, new name and description
    pub(crate) fn with_details(&self, name: &str, description: &str) -> Self {
        Self::new(self.id.clone(), name.trim(), description.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_name() {
        assert_eq!(PersonaId::from_name("Quantum Physics").as_str(), "quantum-physics");
        assert_eq!(PersonaId::from_name("  Game   Theory!? ").as_str(), "game-theory");
        assert_eq!(PersonaId::from_name("Web 3.0").as_str(), "web-30");
    }

    #[test]
    fn test_slug_keeps_non_ascii_letters() {
        assert_eq!(PersonaId::from_name("Sosyoloji Öğretisi").as_str(), "sosyoloji-öğretisi");
    }

    #[test]
    fn test_slug_is_truncated() {
        let long = "a".repeat(80);
        assert_eq!(PersonaId::from_name(&long).as_str().chars().count(), 50);
    }

    #[test]
    fn test_custom_persona_trims_fields() {
        let persona = Persona::custom(" Astronomy ", " Studies the sky. ").unwrap();
        assert_eq!(persona.id().as_str(), "astronomy");
        assert_eq!(persona.name(), "Astronomy");
        assert_eq!(persona.description(), "Studies the sky.");
    }

    #[test]
    fn test_custom_persona_validation() {
        assert!(Persona::custom("", "desc").is_err());
        assert!(Persona::custom("Name", "  ").is_err());
        assert!(Persona::custom("!!!", "desc").is_err());
    }

    #[test]
    fn test_persona_id_serializes_transparently() {
        let json = serde_json::to_string(&PersonaId::new("fizik")).unwrap();
        assert_eq!(json, "\"fizik\"");
    }
}
