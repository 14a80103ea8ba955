//! File lifecycle status and server-code mapping
//!
//! Every uploaded audio file moves through a fixed set of lifecycle states.
//! The backend reports short status codes on the wire; this module owns the
//! total mapping from those codes into the local enumeration.
//!
//! ## Lifecycle
//!
//! ```text
//!  ┌─────────┐  queued   ┌────────────┐  task done  ┌───────────┐
//!  │ Pending │ ────────► │ Processing │ ──────────► │ Processed │
//!  └─────────┘           └────────────┘             └───────────┘
//!       ▲                      │                      │       │
//!       │ retry                │ worker down          │approve│ reject
//!       │                      ▼                      ▼       ▼
//!       │             ┌────────────────────┐   ┌──────────┐ ┌──────────┐
//!       └──────────── │ ServiceUnavailable │   │ Approved │ │ Rejected │
//!                     └────────────────────┘   └──────────┘ └──────────┘
//! ```
//!
//! Terminal states (`Approved`, `Rejected`) are only ever entered via
//! fetched server state or an explicit local approve/reject action; the
//! mapping itself never invents them from ambiguous input.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// FileStatus enum
// ============================================================================

/// Lifecycle state of an uploaded audio file
///
/// Exactly one value at any time. Unknown server input always maps to
/// [`FileStatus::Pending`], the safest non-destructive fallback, so a
/// partial backend rollout introducing new codes can never crash the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Uploaded, waiting for the processing queue
    #[default]
    Pending,
    /// Transcription task running; progress is meaningful in this state only
    Processing,
    /// Transcript generated, awaiting review
    Processed,
    /// Reviewed and approved by staff
    Approved,
    /// The processing service is unreachable; the file can be retried
    ServiceUnavailable,
    /// Rejected by staff, or processing failed
    Rejected,
}

impl FileStatus {
    /// Maps a backend status code (and optional display label) into the
    /// closed local enumeration
    ///
    /// Exact code match wins. The `Pr` alias survives from a pre-migration
    /// code scheme still emitted by the external transcription service.
    /// An unrecognized code falls back to scanning the human label for a
    /// recognizable marker before defaulting to `Pending`.
    ///
    /// This function is total: it never fails and never panics, whatever
    /// the backend sends.
    pub fn from_code(code: &str, display_label: Option<&str>) -> Self {
        match code {
            "AP" => FileStatus::Pending,
            "P" | "Pr" => FileStatus::Processing,
            "PD" => FileStatus::Processed,
            "SU" => FileStatus::ServiceUnavailable,
            "A" => FileStatus::Approved,
            "E" | "R" => FileStatus::Rejected,
            _ => Self::from_label(display_label),
        }
    }

    /// Fallback classification of a human-readable label
    fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return FileStatus::Pending;
        };
        let label = label.to_lowercase();

        if label.contains("processing") || label.contains("transcrib") {
            FileStatus::Processing
        } else if label.contains("approved") {
            FileStatus::Approved
        } else if label.contains("unavailable") {
            FileStatus::ServiceUnavailable
        } else if label.contains("reject") || label.contains("error") || label.contains("fail") {
            FileStatus::Rejected
        } else if label.contains("generated") || label.contains("processed") {
            FileStatus::Processed
        } else {
            FileStatus::Pending
        }
    }

    /// Default human-readable label for this status
    ///
    /// Used when the server does not supply a `status_display` of its own.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Pending => "Awaiting processing",
            FileStatus::Processing => "Processing",
            FileStatus::Processed => "Content generated",
            FileStatus::Approved => "Approved",
            FileStatus::ServiceUnavailable => "Processing service unavailable",
            FileStatus::Rejected => "Rejected",
        }
    }

    /// Returns true for states that end the review workflow
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileStatus::Approved | FileStatus::Rejected)
    }

    /// Returns true while the backend may still change this file's state
    /// on its own (the states worth polling for)
    pub fn is_active(&self) -> bool {
        matches!(self, FileStatus::Pending | FileStatus::Processing)
    }

    /// Returns true if a local approve/reject action is legal from this state
    ///
    /// The client never invents a terminal state: approval is only offered
    /// once the pipeline has produced reviewable content.
    pub fn is_reviewable(&self) -> bool {
        matches!(self, FileStatus::Processed)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
