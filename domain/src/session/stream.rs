//! Streaming events for model responses.
//!
//! [`StreamEvent`] represents individual events in a streaming response,
//! enabling real-time display of a turn as it's generated. A stream is
//! finite and cannot be restarted: it yields any number of `Delta`s and ends
//! with exactly one terminal event (or the channel simply closes).

/// An event in a streaming model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}
