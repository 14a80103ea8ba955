//! Terminal output helpers
//!
//! Every command renders through [`OutputFormatter`] so `--json` flips the
//! whole surface to machine-readable output without touching command logic.

use scribe_core::domain::{FileRecord, FileStatus};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
}

/// Human-readable output formatter with checkmarks and indentation
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &serde_json::Value) {
        // Human formatter doesn't print JSON
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter)
    }
}

/// Single-character status marker for list output
pub fn status_glyph(status: FileStatus) -> char {
    match status {
        FileStatus::Pending => '\u{00b7}',
        FileStatus::Processing => '\u{21bb}',
        FileStatus::Processed => '\u{25cb}',
        FileStatus::Approved => '\u{2713}',
        FileStatus::ServiceUnavailable => '!',
        FileStatus::Rejected => '\u{2717}',
    }
}

/// One list row for a record, progress appended while processing
pub fn record_line(record: &FileRecord) -> String {
    let mut line = format!(
        "{} {:<8} {:<32} {}",
        status_glyph(record.status),
        record.id,
        record.name,
        record.status_display
    );
    if let Some(progress) = record.effective_progress() {
        line.push_str(&format!("  {progress:.0}%"));
        if let Some(label) = &record.progress_label {
            line.push_str(&format!(" ({label})"));
        }
    }
    line
}

/// JSON projection of a record for `--json` list output
pub fn record_json(record: &FileRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id.as_str(),
        "name": record.name,
        "status": record.status_display,
        "progress": record.effective_progress(),
        "progress_label": record.progress_label,
        "uploaded_at": record.uploaded_at.to_rfc3339(),
        "file_type": record.file_type,
        "subset": record.subset,
        "uploader": record.uploader,
    })
}
