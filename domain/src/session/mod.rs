//! Model session domain.
//!
//! - [`entities::Message`] - a single message in a model request history
//! - [`stream::StreamEvent`] - incremental events of a streamed response

pub mod entities;
pub mod stream;
