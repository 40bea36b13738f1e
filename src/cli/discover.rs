use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error, info,
    management::{ReportManager, summary},
    success, utils,
};

/// Sweeps the numbered test endpoints and writes every raw response to a report.
///
/// Probes `/api/test/1` through `/api/test/6` with a one second pause between
/// requests, `rounds` times over. After the sweep the per-endpoint status
/// distribution is printed and the report is written to
/// `<output_dir>/discovery_<YYYYmmdd_HHMMSS>.txt`.
///
/// # Arguments
///
/// * `rounds` - Number of sweeps over all six endpoints (at least one)
/// * `output_dir` - Report directory; falls back to `PROBE_OUTPUT_DIR`, then `./reports`
///
/// # Exit Behavior
///
/// Exits with status 1 only when the token cannot be acquired or the report
/// cannot be written. Failing endpoints never change the exit status.
///
/// # Example Usage
///
/// ```bash
/// apiprobe discover
/// apiprobe discover --rounds 5 --output-dir /tmp/reports
/// ```
pub async fn discover(rounds: u32, output_dir: Option<PathBuf>) {
    let mut report = ReportManager::new("discovery");
    let session = super::open_session(true).await;

    let targets = utils::discovery_targets(config::DISCOVERY_ENDPOINTS, rounds.max(1));
    report.note(&format!("Base URL: {}", session.base_url()));
    report.note(&format!(
        "Discovery: {} request(s), delay {}",
        targets.len(),
        utils::format_secs(config::DISCOVERY_DELAY)
    ));
    report.note("");

    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Probing {}", targets[0]));

    let records = session
        .run(&targets, config::DISCOVERY_DELAY, |record| {
            report.append(record);
            pb.inc(1);
            pb.set_message(format!(
                "{} -> {} in {}",
                record.path,
                record.outcome.label(),
                utils::format_secs(record.elapsed)
            ));
        })
        .await;

    pb.finish_and_clear();

    let summaries = summary::summarize(&records);
    println!("{}", summary::render_table(&summaries));
    info!("{}", summary::overall_line(&summaries));

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
