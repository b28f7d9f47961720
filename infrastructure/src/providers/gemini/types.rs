//! Wire types for the Gemini `generateContent` API
//!
//! Converts domain messages into request bodies and pulls text out of
//! (streamed) responses.

use super::error::{GeminiError, Result};
use debate_domain::{Message, Role};
use serde::{Deserialize, Serialize};

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

impl GenerateContentRequest {
    /// Build a request from the session history plus the new user message.
    ///
    /// System messages are folded into `systemInstruction`; assistant turns
    /// use Gemini's `model` role.
    pub fn from_messages(history: &[Message], content: &str) -> Self {
        let system: Vec<&str> = history
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();

        let mut contents: Vec<Content> = history
            .iter()
            .filter_map(|m| match m.role {
                Role::System => None,
                Role::User => Some(Content::text(Some("user"), &m.content)),
                Role::Assistant => Some(Content::text(Some("model"), &m.content)),
            })
            .collect();
        contents.push(Content::text(Some("user"), content));

        Self {
            contents,
            system_instruction: (!system.is_empty())
                .then(|| Content::text(None, &system.join("\n\n"))),
        }
    }
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate. A blocked prompt is an error.
    pub fn text(&self) -> Result<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
        {
            return Err(GeminiError::Blocked(reason.clone()));
        }
        Ok(self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Best-effort message from an error response body
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Parse one server-sent-events line.
///
/// Returns `None` for blank lines, comments and non-`data` fields.
pub fn parse_sse_line(line: &str) -> Option<Result<String>> {
    let data = line.strip_prefix("data:")?.trim();
    if data.is_empty() || data == "[DONE]" {
        return None;
    }
    Some(
        serde_json::from_str::<GenerateContentResponse>(data)
            .map_err(GeminiError::from)
            .and_then(|response| response.text()),
    )
}
