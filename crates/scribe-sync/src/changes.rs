//! Transition detection between sync passes
//!
//! Each pass compares the freshly resolved records against a cached snapshot
//! of the previous pass and emits a change entry for every record whose
//! user-visible state moved. The snapshot keeps only the fields that matter
//! for comparison, not the full record.
//!
//! Rules:
//! - A record with no previous snapshot entry never produces a change.
//!   First observation establishes the baseline silently.
//! - At most one change entry per record per pass, even when several fields
//!   moved together.

use std::collections::HashMap;

use scribe_core::domain::file_record::FileRecord;
use scribe_core::domain::newtypes::FileId;
use scribe_core::domain::status::FileStatus;

/// Comparison snapshot for one record, taken at the end of a sync pass
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub status: FileStatus,
    pub status_display: String,
    pub progress: Option<f64>,
    pub progress_label: Option<String>,
}

impl From<&FileRecord> for SnapshotEntry {
    fn from(record: &FileRecord) -> Self {
        Self {
            status: record.status,
            status_display: record.status_display.clone(),
            progress: record.progress,
            progress_label: record.progress_label.clone(),
        }
    }
}

/// One noteworthy transition, ready to be announced
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub id: FileId,
    pub file_name: String,
    pub status_label: String,
}

impl StatusChange {
    fn for_record(record: &FileRecord) -> Self {
        Self {
            id: record.id.clone(),
            file_name: record.name.clone(),
            status_label: record.status_display.clone(),
        }
    }
}

/// Diffs resolved records against the previous pass's snapshot
///
/// Returns the changes in record order. Records absent from `previous` are
/// baseline observations and produce nothing.
pub fn detect_changes(
    previous: &HashMap<FileId, SnapshotEntry>,
    records: &[FileRecord],
) -> Vec<StatusChange> {
    records
        .iter()
        .filter(|record| {
            previous
                .get(&record.id)
                .is_some_and(|prev| is_noteworthy(prev, record))
        })
        .map(StatusChange::for_record)
        .collect()
}

/// Decides whether a record moved in a way worth announcing
fn is_noteworthy(prev: &SnapshotEntry, record: &FileRecord) -> bool {
    if record.status != prev.status || record.status_display != prev.status_display {
        return true;
    }

    if record.status == FileStatus::Processing && record.progress_label != prev.progress_label {
        return true;
    }

    // Reaching 100 is announced once even when the status flip lags a pass
    let was_complete = prev.progress.is_some_and(|p| p >= 100.0);
    let is_complete = record.progress.is_some_and(|p| p >= 100.0);
    is_complete && !was_complete
}

/// Rebuilds the snapshot cache from the records of a completed pass
pub fn snapshot_of(records: &[FileRecord]) -> HashMap<FileId, SnapshotEntry> {
    records
        .iter()
        .map(|record| (record.id.clone(), SnapshotEntry::from(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: FileStatus) -> FileRecord {
        let mut r = FileRecord::optimistic(name, "Meeting minutes", "Ops");
        r.status = status;
        r.status_display = status.label().to_string();
        r
    }

    #[test]
    fn test_first_observation_is_silent() {
        let records = vec![record("a.mp3", FileStatus::Processing)];
        let changes = detect_changes(&HashMap::new(), &records);
        assert!(changes.is_empty());
    }

    #[test]
    fn test_status_change_is_detected() {
        let mut r = record("a.mp3", FileStatus::Processing);
        let previous = snapshot_of(std::slice::from_ref(&r));

        r.status = FileStatus::Processed;
        r.status_display = FileStatus::Processed.label().to_string();

        let changes = detect_changes(&previous, std::slice::from_ref(&r));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].file_name, "a.mp3");
        assert_eq!(changes[0].status_label, "Content generated");
    }

    #[test]
    fn test_unchanged_record_produces_nothing() {
        let r = record("a.mp3", FileStatus::Approved);
        let previous = snapshot_of(std::slice::from_ref(&r));
        assert!(detect_changes(&previous, std::slice::from_ref(&r)).is_empty());
    }

    #[test]
    fn test_processing_label_change_is_noteworthy() {
        let mut r = record("a.mp3", FileStatus::Processing);
        r.progress_label = Some("Queued".to_string());
        let previous = snapshot_of(std::slice::from_ref(&r));

        r.progress_label = Some("Transcribing".to_string());
        let changes = detect_changes(&previous, std::slice::from_ref(&r));
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_label_change_ignored_outside_processing() {
        let mut r = record("a.mp3", FileStatus::Approved);
        r.progress_label = Some("old".to_string());
        let previous = snapshot_of(std::slice::from_ref(&r));

        r.progress_label = Some("new".to_string());
        assert!(detect_changes(&previous, std::slice::from_ref(&r)).is_empty());
    }

    #[test]
    fn test_reaching_completion_announced_once() {
        let mut r = record("a.mp3", FileStatus::Processing);
        r.progress = Some(80.0);
        let previous = snapshot_of(std::slice::from_ref(&r));

        r.progress = Some(100.0);
        let changes = detect_changes(&previous, std::slice::from_ref(&r));
        assert_eq!(changes.len(), 1);

        // Next pass still reports 100; nothing new to say
        let previous = snapshot_of(std::slice::from_ref(&r));
        assert!(detect_changes(&previous, std::slice::from_ref(&r)).is_empty());
    }

    #[test]
    fn test_one_entry_per_record_even_for_compound_moves() {
        let mut r = record("a.mp3", FileStatus::Processing);
        r.progress = Some(60.0);
        r.progress_label = Some("Transcribing".to_string());
        let previous = snapshot_of(std::slice::from_ref(&r));

        r.status = FileStatus::Processed;
        r.status_display = FileStatus::Processed.label().to_string();
        r.progress = Some(100.0);
        r.progress_label = Some("Done".to_string());

        let changes = detect_changes(&previous, std::slice::from_ref(&r));
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_changes_follow_record_order() {
        let mut a = record("a.mp3", FileStatus::Processing);
        let mut b = record("b.mp3", FileStatus::Processing);
        let previous = snapshot_of(&[a.clone(), b.clone()]);

        a.status = FileStatus::Processed;
        a.status_display = FileStatus::Processed.label().to_string();
        b.status = FileStatus::Rejected;
        b.status_display = FileStatus::Rejected.label().to_string();

        let changes = detect_changes(&previous, &[a, b]);
        let names: Vec<_> = changes.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.mp3", "b.mp3"]);
    }
}
