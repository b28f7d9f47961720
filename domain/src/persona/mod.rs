//! Persona domain.
//!
//! - [`entities::Persona`] - an expert voice (id, name, description)
//! - [`entities::PersonaId`] - slug-form persona identifier
//! - [`registry::PersonaRegistry`] - built-in and user-defined experts by id

pub mod entities;
pub mod registry;
