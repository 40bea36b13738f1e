use std::{error::Error, ops::RangeInclusive, time::Duration};

use chrono::{DateTime, Local};

/// Path of a numbered test endpoint, e.g. `/api/test/3`.
pub fn test_endpoint_path(id: u32) -> String {
    format!("/api/test/{}", id)
}

/// Paths for `rounds` sweeps over the given endpoint identifiers, in request order.
pub fn discovery_targets(ids: RangeInclusive<u32>, rounds: u32) -> Vec<String> {
    (0..rounds)
        .flat_map(|_| ids.clone().map(test_endpoint_path))
        .collect()
}

/// Joins a base URL and an absolute path without doubling the slash.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Parses a delay given in (fractional) seconds, e.g. `0.5`.
///
/// Used as the clap value parser for the timing delay argument, so every
/// rejection surfaces as an argument error instead of a panic.
///
/// # Errors
///
/// Fails for text that is not a number, for negative values, NaN and infinity,
/// and for values too large to be represented as a [`Duration`].
///
/// # Example
///
/// ```
/// assert_eq!(parse_delay("0.5"), Ok(Duration::from_millis(500)));
/// assert!(parse_delay("1e30").is_err());
/// ```
pub fn parse_delay(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("delay must be a non-negative number, got '{}'", value));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("delay '{}' is out of range: {}", value, e))
}

/// Normalizes an endpoint path so it always starts with a slash.
pub fn parse_endpoint_path(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Err("endpoint path must not be empty".to_string());
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        return Err(format!(
            "'{}' looks like a full URL; pass a path and set BASE_URL instead",
            trimmed
        ));
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{}", trimmed))
    }
}

/// Report file name embedding the run start time, e.g. `discovery_20261015_101500.txt`.
pub fn report_file_name(label: &str, started_at: DateTime<Local>) -> String {
    format!("{}_{}.txt", label, started_at.format("%Y%m%d_%H%M%S"))
}

/// Formats a duration as seconds with millisecond precision, e.g. `4.312s`.
///
/// Used for every duration shown on the console and written to reports.
pub fn format_secs(duration: Duration) -> String {
    format!("{:.3}s", duration.as_secs_f64())
}

/// Renders an error and all of its sources on one line.
pub fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
