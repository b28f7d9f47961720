//! Verdict value objects

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Returned without calling a model when no expert has spoken yet
pub const NO_OPINIONS_VERDICT: &str = "Henüz uzman görüşü bulunmadığı için karar verilemedi.";

/// Returned when both judge models fail or stay silent
pub const UNAVAILABLE_VERDICT: &str = "Hakem sistemi geçici olarak kullanılamıyor. Uzmanların görüşleri kaydedildi ve tartışma devam edebilir.";

/// Which link of the judge chain produced a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "model", rename_all = "snake_case")]
pub enum VerdictSource {
    Primary(Model),
    Fallback(Model),
    NoOpinions,
    Unavailable,
}

impl VerdictSource {
    /// True when a model actually ruled
    pub fn is_ruling(&self) -> bool {
        matches!(self, VerdictSource::Primary(_) | VerdictSource::Fallback(_))
    }
}

/// Final ruling on a debate (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    content: String,
    source: VerdictSource,
}

impl Verdict {
    pub fn ruling(content: impl Into<String>, source: VerdictSource) -> Self {
        Self {
            content: content.into(),
            source,
        }
    }

    pub fn no_opinions() -> Self {
        Self::ruling(NO_OPINIONS_VERDICT, VerdictSource::NoOpinions)
    }

    pub fn unavailable() -> Self {
        Self::ruling(UNAVAILABLE_VERDICT, VerdictSource::Unavailable)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &VerdictSource {
        &self.source
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
