//! Infrastructure layer for socratic-chat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, credential lookup, and configuration
//! file loading.

pub mod config;
pub mod credentials;
pub mod http;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBehaviorConfig, FileConfig, FileEndpointConfig,
    FileModelConfig, FileOutputConfig, FileReplConfig,
};
pub use credentials::{ApiKey, CredentialError, resolve_api_key};
pub use http::{client::HttpQueryClient, logging::LoggingQueryClient};
