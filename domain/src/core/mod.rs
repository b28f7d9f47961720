//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - text-generation backends (pool members and judges)
//! - [`topic::Topic`] - a validated debate topic
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod string;
pub mod topic;
