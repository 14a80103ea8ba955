//! scribesync API - HTTP adapter for the transcription pipeline backend
//!
//! Provides:
//! - [`client::ApiClient`] - authenticated reqwest wrapper with base URL
//!   construction
//! - [`endpoints`] - typed wire DTOs and endpoint calls
//! - [`provider::BackendProvider`] - the [`IBackendApi`] port implementation
//!
//! [`IBackendApi`]: scribe_core::ports::IBackendApi

pub mod client;
pub mod endpoints;
pub mod provider;

pub use client::ApiClient;
pub use provider::BackendProvider;
