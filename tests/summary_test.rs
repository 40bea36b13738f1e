use std::time::Duration;

use apiprobe::{
    management::summary::{overall_line, render_table, summarize},
    types::{ProbeOutcome, ProbeRecord, Stability},
};
use chrono::Utc;

fn response(status: u16, reason: &str) -> ProbeOutcome {
    ProbeOutcome::Response {
        version: "HTTP/1.1".to_string(),
        status,
        reason: Some(reason.to_string()),
        headers: Vec::new(),
        body: String::new(),
        body_error: None,
    }
}

fn record(index: usize, id: u32, millis: u64, outcome: ProbeOutcome) -> ProbeRecord {
    ProbeRecord {
        index,
        path: format!("/api/test/{}", id),
        started_at: Utc::now(),
        elapsed: Duration::from_millis(millis),
        outcome,
    }
}

fn sample() -> Vec<ProbeRecord> {
    vec![
        record(1, 2, 100, response(200, "OK")),
        record(2, 1, 200, response(503, "Service Unavailable")),
        record(3, 3, 300, ProbeOutcome::Failed { error: "timed out".to_string() }),
        record(4, 2, 300, response(200, "OK")),
        record(5, 1, 400, response(200, "OK")),
        record(6, 3, 500, response(500, "Internal Server Error")),
    ]
}

#[test]
fn test_summarize_keeps_first_seen_order() {
    let summaries = summarize(&sample());
    let paths: Vec<&str> = summaries.iter().map(|s| s.path.as_str()).collect();
    assert_eq!(paths, vec!["/api/test/2", "/api/test/1", "/api/test/3"]);
}

#[test]
fn test_summarize_classifies_endpoints() {
    let summaries = summarize(&sample());

    assert_eq!(summaries[0].stability, Stability::Stable);
    assert_eq!(summaries[0].attempts, 2);
    assert_eq!(summaries[0].successes, 2);
    assert_eq!(summaries[0].average_elapsed, Duration::from_millis(200));

    assert_eq!(summaries[1].stability, Stability::Unstable);
    assert_eq!(
        summaries[1].distribution,
        vec![
            ("200 OK".to_string(), 1),
            ("503 Service Unavailable".to_string(), 1)
        ]
    );

    // Transport errors sort after real status codes
    assert_eq!(summaries[2].stability, Stability::Failed);
    assert_eq!(
        summaries[2].distribution,
        vec![
            ("500 Internal Server Error".to_string(), 1),
            ("ERROR".to_string(), 1)
        ]
    );
}

#[test]
fn test_render_table_lists_every_endpoint() {
    let table = render_table(&summarize(&sample()));
    assert!(table.contains("/api/test/1"));
    assert!(table.contains("/api/test/2"));
    assert!(table.contains("/api/test/3"));
    assert!(table.contains("UNSTABLE"));
    assert!(table.contains("503 Service Unavailable (1x)"));
}

#[test]
fn test_overall_line() {
    let line = overall_line(&summarize(&sample()));
    assert_eq!(
        line,
        "Stable 1/3 | Unstable 1/3 | Failed 1/3 | Success rate 50.0%"
    );

    assert_eq!(
        overall_line(&[]),
        "Stable 0/0 | Unstable 0/0 | Failed 0/0 | Success rate 0.0%"
    );
}
