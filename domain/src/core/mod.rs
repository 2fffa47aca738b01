//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - identifier of the remote text-generation model
//! - [`params::ModelParams`] - sampling parameters sent with every query
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod params;
