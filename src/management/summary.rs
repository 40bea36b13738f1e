use std::{collections::BTreeMap, time::Duration};

use tabled::Table;

use crate::{
    types::{EndpointSummary, ProbeRecord, Stability, SummaryTableRow},
    utils,
};

/// Groups records by path (first-seen order) and classifies each endpoint.
///
/// An endpoint that only answered 2xx is stable, one with some 2xx is
/// unstable, one that never answered 2xx has failed.
pub fn summarize(records: &[ProbeRecord]) -> Vec<EndpointSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: BTreeMap<&str, Vec<&ProbeRecord>> = BTreeMap::new();

    for record in records {
        let entry = grouped.entry(record.path.as_str()).or_default();
        if entry.is_empty() {
            order.push(record.path.as_str());
        }
        entry.push(record);
    }

    order
        .into_iter()
        .map(|path| summarize_endpoint(path, &grouped[path]))
        .collect()
}

fn summarize_endpoint(path: &str, records: &[&ProbeRecord]) -> EndpointSummary {
    let attempts = records.len();
    let successes = records.iter().filter(|r| r.outcome.is_success()).count();

    let mut by_status: BTreeMap<u16, (String, usize)> = BTreeMap::new();
    let mut errors = 0;
    for record in records {
        match record.outcome.status() {
            Some(status) => {
                by_status
                    .entry(status)
                    .or_insert_with(|| (record.outcome.label(), 0))
                    .1 += 1
            }
            None => errors += 1,
        }
    }

    let mut distribution: Vec<(String, usize)> = by_status.into_values().collect();
    if errors > 0 {
        distribution.push(("ERROR".to_string(), errors));
    }

    let total: Duration = records.iter().map(|r| r.elapsed).sum();
    let average_elapsed = if attempts > 0 {
        total / attempts as u32
    } else {
        Duration::ZERO
    };

    let stability = if successes == 0 {
        Stability::Failed
    } else if successes == attempts {
        Stability::Stable
    } else {
        Stability::Unstable
    };

    EndpointSummary {
        path: path.to_string(),
        attempts,
        successes,
        distribution,
        average_elapsed,
        stability,
    }
}

/// Renders the summaries as a table, one row per endpoint.
///
/// The `observed` column lists every status seen with its count, e.g.
/// `200 OK (4x), 503 Service Unavailable (1x)`. Transport errors show up as
/// `ERROR`.
pub fn render_table(summaries: &[EndpointSummary]) -> String {
    let rows: Vec<SummaryTableRow> = summaries
        .iter()
        .map(|s| SummaryTableRow {
            endpoint: s.path.clone(),
            status: s.stability.to_string(),
            attempts: s.attempts,
            passed: s.successes,
            failed: s.attempts - s.successes,
            observed: s
                .distribution
                .iter()
                .map(|(label, count)| format!("{} ({}x)", label, count))
                .collect::<Vec<_>>()
                .join(", "),
            avg_time: utils::format_secs(s.average_elapsed),
        })
        .collect();

    Table::new(rows).to_string()
}

/// One-line overall result, e.g. `Stable 4/6 | Unstable 1/6 | Failed 1/6 | Success rate 83.3%`.
pub fn overall_line(summaries: &[EndpointSummary]) -> String {
    let endpoints = summaries.len();
    let count = |wanted: Stability| summaries.iter().filter(|s| s.stability == wanted).count();
    let attempts: usize = summaries.iter().map(|s| s.attempts).sum();
    let successes: usize = summaries.iter().map(|s| s.successes).sum();
    let rate = if attempts > 0 {
        successes as f64 / attempts as f64 * 100.0
    } else {
        0.0
    };

    format!(
        "Stable {}/{n} | Unstable {}/{n} | Failed {}/{n} | Success rate {:.1}%",
        count(Stability::Stable),
        count(Stability::Unstable),
        count(Stability::Failed),
        rate,
        n = endpoints
    )
}
