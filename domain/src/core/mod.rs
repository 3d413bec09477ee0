//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the generative model asked to draft a plan
//! - [`error::DomainError`]: domain-level errors and their [`error::ErrorKind`] tags

pub mod error;
pub mod model;
