//! Describe Persona use case
//!
//! Drafts a short academic description for a new expert field. Used while
//! authoring custom personas, outside the debate loop.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use debate_domain::{DebatePromptTemplate, Model};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DescribePersonaError {
    #[error("Expert name cannot be empty")]
    EmptyName,

    #[error("Model returned an empty description")]
    EmptyAnswer,

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

pub struct DescribePersonaUseCase<G: LlmGateway + ?Sized + 'static> {
    gateway: Arc<G>,
    model: Model,
}

impl<G: LlmGateway + ?Sized + 'static> DescribePersonaUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            model: Model::default_describe(),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub async fn execute(&self, name: &str) -> Result<String, DescribePersonaError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DescribePersonaError::EmptyName);
        }
        info!("Drafting a description for \"{}\" with {}", name, self.model);
        let session = self.gateway.create_session(&self.model).await?;
        let text = session
            .send(&DebatePromptTemplate::describe_persona(name))
            .await?;
        let description = text.trim();
        if description.is_empty() {
            return Err(DescribePersonaError::EmptyAnswer);
        }
        Ok(description.to_string())
    }
}
