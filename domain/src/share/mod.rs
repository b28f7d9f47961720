//! Share records: a concluded debate in a serializable form.
//!
//! The record layout (`topic`, `chatHistory`, `selectedBranches`,
//! `branchDetails`, `finalVerdict`, `timestamp`) is what read-only viewers
//! consume, so field names are fixed.

use crate::core::error::DomainError;
use crate::debate::session::{DebatePhase, DebateSession};
use crate::debate::transcript::{Transcript, TurnMessage};
use crate::persona::entities::{Persona, PersonaId};
use rand::Rng;
use serde::{Deserialize, Serialize};

const SHARE_ID_LEN: usize = 8;
const SHARE_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random 8-character key of a share record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareId(String);

impl ShareId {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let id = (0..SHARE_ID_LEN)
            .map(|_| SHARE_ID_ALPHABET[rng.gen_range(0..SHARE_ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.len() == SHARE_ID_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::InvalidShareId(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShareId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ShareId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ShareId> for String {
    fn from(id: ShareId) -> Self {
        id.0
    }
}

/// A concluded debate as stored for sharing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    pub topic: String,
    pub chat_history: Vec<TurnMessage>,
    pub selected_branches: Vec<PersonaId>,
    pub branch_details: Vec<Persona>,
    pub final_verdict: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ShareRecord {
    /// Capture a concluded session
    pub fn from_session(session: &DebateSession, timestamp: i64) -> Result<Self, DomainError> {
        let (Some(configuration), Some(verdict)) = (session.configuration(), session.verdict())
        else {
            return Err(DomainError::InvalidTransition {
                action: "share",
                phase: session.phase().as_str(),
            });
        };
        if session.phase() != DebatePhase::Concluded {
            return Err(DomainError::InvalidTransition {
                action: "share",
                phase: session.phase().as_str(),
            });
        }
        Ok(Self {
            topic: configuration.topic().content().to_string(),
            chat_history: session.transcript().snapshot(),
            selected_branches: configuration.persona_ids().to_vec(),
            branch_details: session.personas().to_vec(),
            final_verdict: verdict.to_string(),
            timestamp,
        })
    }

    pub fn transcript(&self) -> Transcript {
        Transcript::from(self.chat_history.clone())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;
    use crate::debate::assignment::ModelAssignment;
    use crate::debate::configuration::DebateConfiguration;
    use crate::persona::registry::PersonaRegistry;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn concluded_session() -> DebateSession {
        let registry = PersonaRegistry::new();
        let ids = ["fizik", "felsefe", "biyoloji", "ekonomi"]
            .iter()
            .map(|s| PersonaId::new(*s))
            .collect();
        let config = DebateConfiguration::new("Yapay zekâ tehlikeli mi?", ids)
            .unwrap()
            .with_turn_budget(2)
            .unwrap();
        let mut session = DebateSession::new()
            .start(config, &registry, ModelAssignment::fixed(Model::default_pool()).unwrap())
            .unwrap();
        for content in ["Enerji korunur.", "Önce enerjiyi tanımla."] {
            let persona = session.current_turn().unwrap().persona.clone();
            session = session
                .record_turn(TurnMessage::assistant(&persona, content))
                .unwrap();
        }
        session
            .begin_adjudication()
            .unwrap()
            .conclude("Fizik argümanları daha güçlü. SONUÇ: Belirsiz")
            .unwrap()
    }

    #[test]
    fn test_share_id_generation() {
        let mut rng = StdRng::seed_from_u64(9);
        let id = ShareId::generate(&mut rng);
        assert_eq!(id.as_str().len(), 8);
        assert!(ShareId::parse(id.as_str()).is_ok());
    }

    #[test]
    fn test_share_id_parse_rejects_bad_input() {
        assert!(ShareId::parse("short").is_err());
        assert!(ShareId::parse("abc/1234").is_err());
        assert!(ShareId::parse("../../etc").is_err());
    }

    #[test]
    fn test_record_requires_concluded_session() {
        assert!(ShareRecord::from_session(&DebateSession::new(), 0).is_err());
    }

    #[test]
    fn test_record_roundtrip_preserves_transcript() {
        let session = concluded_session();
        let record = ShareRecord::from_session(&session, 1_700_000_000_000).unwrap();
        let decoded = ShareRecord::from_json(&record.to_json().unwrap()).unwrap();

        let original = session.transcript().messages();
        let restored = decoded.transcript();
        assert_eq!(restored.len(), original.len());
        for (a, b) in original.iter().zip(restored.messages()) {
            assert_eq!(a.role, b.role);
            assert_eq!(a.content, b.content);
            assert_eq!(a.persona_name, b.persona_name);
        }
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_record_field_names() {
        let record = ShareRecord::from_session(&concluded_session(), 42).unwrap();
        let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert!(json.get("chatHistory").is_some());
        assert!(json.get("selectedBranches").is_some());
        assert!(json.get("branchDetails").is_some());
        assert_eq!(json["finalVerdict"], "Fizik argümanları daha güçlü. SONUÇ: Belirsiz");
        assert_eq!(json["timestamp"], 42);
    }
}
