use std::time::Duration;

use apiprobe::utils::*;
use chrono::{Local, TimeZone};

#[test]
fn test_test_endpoint_path() {
    assert_eq!(test_endpoint_path(1), "/api/test/1");
    assert_eq!(test_endpoint_path(6), "/api/test/6");
}

#[test]
fn test_discovery_targets_single_round() {
    let targets = discovery_targets(1..=6, 1);
    assert_eq!(
        targets,
        vec![
            "/api/test/1",
            "/api/test/2",
            "/api/test/3",
            "/api/test/4",
            "/api/test/5",
            "/api/test/6",
        ]
    );
}

#[test]
fn test_discovery_targets_repeats_full_sweeps() {
    let targets = discovery_targets(1..=3, 2);
    assert_eq!(targets.len(), 6);
    assert_eq!(targets[0], "/api/test/1");
    assert_eq!(targets[2], "/api/test/3");
    // Second round starts over from the first endpoint
    assert_eq!(targets[3], "/api/test/1");

    assert!(discovery_targets(1..=6, 0).is_empty());
}

#[test]
fn test_join_url() {
    assert_eq!(
        join_url("https://api.example.com", "/api/test/1"),
        "https://api.example.com/api/test/1"
    );
    assert_eq!(
        join_url("https://api.example.com/", "/api/test/1"),
        "https://api.example.com/api/test/1"
    );
    assert_eq!(
        join_url("http://127.0.0.1:8080", "api/auth/generate"),
        "http://127.0.0.1:8080/api/auth/generate"
    );
}

#[test]
fn test_parse_delay() {
    assert_eq!(parse_delay("0.5"), Ok(Duration::from_millis(500)));
    assert_eq!(parse_delay("1"), Ok(Duration::from_secs(1)));
    assert_eq!(parse_delay(" 2.25 "), Ok(Duration::from_millis(2250)));
    assert_eq!(parse_delay("0"), Ok(Duration::ZERO));

    assert!(parse_delay("-1").is_err());
    assert!(parse_delay("soon").is_err());
    assert!(parse_delay("NaN").is_err());
    assert!(parse_delay("inf").is_err());
    // Finite but beyond what a Duration can hold
    assert!(parse_delay("1e30").is_err());
}

#[test]
fn test_parse_endpoint_path() {
    assert_eq!(parse_endpoint_path("/api/test/2"), Ok("/api/test/2".to_string()));
    assert_eq!(parse_endpoint_path("api/test/5"), Ok("/api/test/5".to_string()));

    assert!(parse_endpoint_path("").is_err());
    assert!(parse_endpoint_path("/").is_err());
    assert!(parse_endpoint_path("https://api.example.com/api/test/1").is_err());
}

#[test]
fn test_report_file_name() {
    let started = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap();
    assert_eq!(
        report_file_name("discovery", started),
        "discovery_20260307_090502.txt"
    );
}

#[test]
fn test_format_secs() {
    assert_eq!(format_secs(Duration::from_millis(4312)), "4.312s");
    assert_eq!(format_secs(Duration::ZERO), "0.000s");
}

#[test]
fn test_error_chain_includes_sources() {
    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "request failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    let err = Outer(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ));
    assert_eq!(error_chain(&err), "request failed: connection refused");
}
