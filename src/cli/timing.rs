use std::{path::PathBuf, time::Duration};

use crate::{config, error, info, management::ReportManager, success, utils, warning};

/// Times `count` sequential GETs against a single endpoint.
///
/// Prints the round-trip duration of each request next to its index as soon
/// as it completes. No statistics are computed here; the raw responses are
/// kept in `<output_dir>/timing_<YYYYmmdd_HHMMSS>.txt` for later inspection.
///
/// # Arguments
///
/// * `endpoint` - Path to request, e.g. `/api/test/2`
/// * `count` - Number of requests; 0 returns without contacting the API
/// * `delay` - Fixed pause between two requests
/// * `output_dir` - Report directory; falls back to `PROBE_OUTPUT_DIR`, then `./reports`
///
/// # Example Output
///
/// ```text
/// [o] Request 1/3: 200 OK in 4.312s
/// [!] Request 2/3: 503 Service Unavailable in 0.087s
/// [o] Request 3/3: 200 OK in 4.298s
/// ```
pub async fn timing(endpoint: String, count: u32, delay: Duration, output_dir: Option<PathBuf>) {
    if count == 0 {
        warning!("Request count is 0, nothing to probe.");
        return;
    }

    let mut report = ReportManager::new("timing");
    let session = super::open_session(true).await;

    info!(
        "Timing {} x GET {} with {} between requests",
        count,
        endpoint,
        utils::format_secs(delay)
    );
    report.note(&format!("Base URL: {}", session.base_url()));
    report.note(&format!(
        "Timing: GET {} x {}, delay {}",
        endpoint,
        count,
        utils::format_secs(delay)
    ));
    report.note("");

    let targets = vec![endpoint; count as usize];
    session
        .run(&targets, delay, |record| {
            report.append(record);
            let line = format!(
                "Request {}/{}: {} in {}",
                record.index,
                count,
                record.outcome.label(),
                utils::format_secs(record.elapsed)
            );
            if record.outcome.is_success() {
                info!("{}", line);
            } else {
                warning!("{}", line);
            }
        })
        .await;

    super::warn_if_token_expired(&session);

    let dir = output_dir.unwrap_or_else(config::output_dir);
    match report.persist(&dir).await {
        Ok(path) => success!(
            "Recorded {} probe(s) to {}",
            report.record_count(),
            path.display()
        ),
        Err(e) => error!("Failed to write report to {}: {}", dir.display(), e),
    }
}
