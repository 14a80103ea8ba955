//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces that the domain core depends on, but whose
//! implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IBackendApi`] - The transcription pipeline's HTTP contract
//! - [`INotifier`] - User-facing notification delivery

pub mod backend;
pub mod notification;

pub use backend::{
    AudioText, DashboardItem, DashboardSnapshot, ExportArchive, FileStatusReport, IBackendApi,
    ProgressValue, ReprocessReceipt, StatusCounts, TaskProgress,
};
pub use notification::{INotifier, Notification, Permission};
