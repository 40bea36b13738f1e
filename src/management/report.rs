use std::{fmt::Write, io::Error, path::{Path, PathBuf}};

use chrono::{DateTime, Local, SecondsFormat};

use crate::{
    types::{ProbeOutcome, ProbeRecord},
    utils,
};

/// Append-only text buffer of one run, flushed once to a timestamped file.
pub struct ReportManager {
    label: String,
    started_at: DateTime<Local>,
    buffer: String,
    records: usize,
}

impl ReportManager {
    /// Starts an empty report whose file name uses the current local time.
    ///
    /// `label` prefixes the file name, e.g. `discovery` or `timing`.
    pub fn new(label: &str) -> Self {
        Self::started_at(label, Local::now())
    }

    pub fn started_at(label: &str, started_at: DateTime<Local>) -> Self {
        Self {
            label: label.to_string(),
            started_at,
            buffer: String::new(),
            records: 0,
        }
    }

    /// Adds a run header line, e.g. target base URL and parameters.
    pub fn note(&mut self, line: &str) {
        self.buffer.push_str("# ");
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Appends the rendered record to the buffer.
    ///
    /// Records are never rewritten or reordered, so the report lists them in
    /// the order they were appended. See [`render_record`] for the layout.
    pub fn append(&mut self, record: &ProbeRecord) {
        self.buffer.push_str(&render_record(record));
        self.records += 1;
    }

    pub fn record_count(&self) -> usize {
        self.records
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    pub fn file_name(&self) -> String {
        utils::report_file_name(&self.label, self.started_at)
    }

    /// Writes the buffer to `dir/<label>_<start time>.txt` and returns the path.
    ///
    /// Creates `dir` (and its parents) when missing. An existing file with the
    /// same name, from a run started in the same second, is overwritten.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be created or the file
    /// cannot be written.
    pub async fn persist(&self, dir: &Path) -> Result<PathBuf, Error> {
        async_fs::create_dir_all(dir).await?;
        let path = dir.join(self.file_name());
        async_fs::write(&path, self.buffer.as_bytes()).await?;
        Ok(path)
    }
}

/// Renders one probe as a raw response dump.
///
/// # Layout
///
/// ```text
/// === Probe #3: GET /api/test/3 ===
/// Timestamp: 2026-10-15T08:30:00.000Z
/// Elapsed: 0.412s
/// HTTP/1.1 500 Internal Server Error
/// content-type: application/json
///
/// {"detail":"Internal Server Error"}
/// ```
///
/// A body that could not be read completely is followed by a
/// `BODY ERROR: ...` line. A probe that got no response at all shows
/// `ERROR: ...` instead of the status line.
pub fn render_record(record: &ProbeRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Probe #{}: GET {} ===", record.index, record.path);
    let _ = writeln!(
        out,
        "Timestamp: {}",
        record.started_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    );
    let _ = writeln!(out, "Elapsed: {}", utils::format_secs(record.elapsed));

    match &record.outcome {
        ProbeOutcome::Response {
            version,
            status,
            reason,
            headers,
            body,
            body_error,
        } => {
            match reason {
                Some(reason) => {
                    let _ = writeln!(out, "{} {} {}", version, status, reason);
                }
                None => {
                    let _ = writeln!(out, "{} {}", version, status);
                }
            }
            for (name, value) in headers {
                let _ = writeln!(out, "{}: {}", name, value);
            }
            out.push('\n');
            out.push_str(body);
            if !body.is_empty() && !body.ends_with('\n') {
                out.push('\n');
            }
            if let Some(error) = body_error {
                let _ = writeln!(out, "BODY ERROR: {}", error);
            }
        }
        ProbeOutcome::Failed { error } => {
            let _ = writeln!(out, "ERROR: {}", error);
        }
    }

    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(index: usize, outcome: ProbeOutcome) -> ProbeRecord {
        ProbeRecord {
            index,
            path: format!("/api/test/{}", index),
            started_at: Utc.with_ymd_and_hms(2026, 10, 15, 8, 30, 0).unwrap(),
            elapsed: Duration::from_millis(1250),
            outcome,
        }
    }

    #[test]
    fn renders_raw_response() {
        let text = render_record(&record(
            1,
            ProbeOutcome::Response {
                version: "HTTP/1.1".to_string(),
                status: 503,
                reason: Some("Service Unavailable".to_string()),
                headers: vec![("retry-after".to_string(), "5".to_string())],
                body: "{\"detail\":\"warming up\"}".to_string(),
                body_error: None,
            },
        ));

        assert!(text.starts_with("=== Probe #1: GET /api/test/1 ===\n"));
        assert!(text.contains("Timestamp: 2026-10-15T08:30:00.000Z\n"));
        assert!(text.contains("Elapsed: 1.250s\n"));
        assert!(text.contains("HTTP/1.1 503 Service Unavailable\nretry-after: 5\n\n{\"detail\":\"warming up\"}\n"));
    }

    #[test]
    fn renders_body_error_after_headers() {
        let text = render_record(&record(
            3,
            ProbeOutcome::Response {
                version: "HTTP/1.1".to_string(),
                status: 200,
                reason: Some("OK".to_string()),
                headers: vec![("content-length".to_string(), "100".to_string())],
                body: String::new(),
                body_error: Some("connection closed before message completed".to_string()),
            },
        ));

        assert!(text.contains(
            "HTTP/1.1 200 OK\ncontent-length: 100\n\nBODY ERROR: connection closed before message completed\n"
        ));
        assert!(!text.contains("\nERROR: "));
    }

    #[test]
    fn renders_failure_verbatim() {
        let text = render_record(&record(
            2,
            ProbeOutcome::Failed {
                error: "operation timed out".to_string(),
            },
        ));
        assert!(text.contains("ERROR: operation timed out\n"));
    }

    #[test]
    fn appends_in_order() {
        let mut report = ReportManager::new("discovery");
        for i in 1..=3 {
            report.append(&record(i, ProbeOutcome::Failed { error: format!("e{}", i) }));
        }

        assert_eq!(report.record_count(), 3);
        let first = report.contents().find("Probe #1").unwrap();
        let second = report.contents().find("Probe #2").unwrap();
        let third = report.contents().find("Probe #3").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn file_name_embeds_start_time() {
        let started = Local.with_ymd_and_hms(2026, 10, 15, 10, 15, 0).unwrap();
        let report = ReportManager::started_at("timing", started);
        assert_eq!(report.file_name(), "timing_20261015_101500.txt");
    }
}
