//! scribesync Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `FileRecord`, `FileStatus`, identifier newtypes
//! - **Port definitions** - Traits for adapters: `IBackendApi`, `INotifier`
//! - **Configuration** - Typed YAML configuration with defaults and validation
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no network or UI
//! dependencies. Ports define trait interfaces that adapter crates implement:
//! the HTTP client in `scribe-api` and the notification sinks in `scribe-sync`.

pub mod config;
pub mod domain;
pub mod ports;
