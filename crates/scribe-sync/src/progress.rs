//! Task progress resolution
//!
//! For every record in the `Processing` state with a task reference, one
//! sync pass fetches task-level progress and merges it into the record's
//! view model. The merge is deliberately conservative:
//!
//! - A value that fails to parse keeps the previous known progress. A reset
//!   to zero would visually regress the progress bar users are watching.
//! - An explicit completion signal forces 100, whatever the raw number says.
//!   Celery workers report stale numeric metadata after completion.
//! - Progress never decreases while the same task is active.
//! - A failed fetch leaves the record untouched and is logged at warn level;
//!   one failing task must not block updates for the rest of the batch.

use std::sync::Arc;

use futures_util::{stream, StreamExt};
use tracing::{debug, warn};

use scribe_core::domain::file_record::FileRecord;
use scribe_core::domain::status::FileStatus;
use scribe_core::ports::backend::{IBackendApi, ProgressValue, TaskProgress};

/// Parses a raw progress value into a 0-100 percentage
///
/// Accepts a plain number or a percentage-formatted string ("42%" or "42").
/// Returns `None` when the value is unusable, so the caller can keep the
/// previous reading.
pub fn parse_progress(value: &ProgressValue) -> Option<f64> {
    let number = match value {
        ProgressValue::Number(n) => Some(*n),
        ProgressValue::Text(text) => text.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
    }?;

    if number.is_finite() {
        Some(number.clamp(0.0, 100.0))
    } else {
        None
    }
}

/// Resolves per-task progress for processing records
pub struct ProgressResolver {
    backend: Arc<dyn IBackendApi>,
}

impl ProgressResolver {
    /// Creates a resolver over the given backend
    pub fn new(backend: Arc<dyn IBackendApi>) -> Self {
        Self { backend }
    }

    /// Fetches and merges progress for one record
    ///
    /// Records that are not `Processing`, or that carry no task reference,
    /// pass through unchanged. A fetch failure is soft: the record keeps its
    /// previous progress and label.
    pub async fn resolve(&self, mut record: FileRecord) -> FileRecord {
        if record.status != FileStatus::Processing {
            return record;
        }
        let Some(task_id) = record.task_id.clone() else {
            return record;
        };

        match self.backend.fetch_task_progress(&task_id).await {
            Ok(report) => {
                merge_report(&mut record, &report);
                debug!(
                    file = %record.id,
                    task = %task_id,
                    progress = record.progress,
                    "Resolved task progress"
                );
            }
            Err(err) => {
                warn!(
                    file = %record.id,
                    task = %task_id,
                    error = %err,
                    "Progress fetch failed, keeping previous value"
                );
            }
        }

        record
    }

    /// Resolves a whole pass worth of records
    ///
    /// Per-task fetches for different files run concurrently (bounded by
    /// `concurrency`); record order is preserved so the caller can apply the
    /// result as one atomic replacement.
    pub async fn resolve_all(
        &self,
        records: Vec<FileRecord>,
        concurrency: usize,
    ) -> Vec<FileRecord> {
        stream::iter(records.into_iter().map(|record| self.resolve(record)))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

/// Merges one progress report into a processing record
fn merge_report(record: &mut FileRecord, report: &TaskProgress) {
    let previous = record.progress;

    record.progress = if report.is_completed {
        // Completion overrides whatever the numeric metadata still says
        Some(100.0)
    } else {
        match parse_progress(&report.progress) {
            // Never regress within the same processing episode
            Some(value) => Some(previous.map_or(value, |p| p.max(value))),
            None => previous,
        }
    };

    if !report.status.is_empty() {
        record.progress_label = Some(report.status.clone());
    }
}
