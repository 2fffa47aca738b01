//! HTTP adapter for the remote query endpoint.
//!
//! - [`wire`] - request body and response extraction
//! - [`client::HttpQueryClient`] - `reqwest`-backed [`QueryClient`](socratic_application::QueryClient)
//! - [`logging::LoggingQueryClient`] - decorator that logs every call

pub mod client;
pub mod logging;
pub mod wire;
