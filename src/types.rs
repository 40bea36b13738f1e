use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

/// Assumed lifetime of an access token when the server does not report one.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest<'a> {
    pub refresh_token: &'a str,
}

/// Short-lived bearer token authorizing every probe of a run.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    obtained_at: DateTime<Utc>,
    expires_in: Option<u64>,
}

impl AccessToken {
    pub fn new(value: String, expires_in: Option<u64>) -> Self {
        Self {
            value,
            obtained_at: Utc::now(),
            expires_in,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }

    pub fn lifetime(&self) -> Duration {
        self.expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME)
    }

    /// Whether the token has outlived its (reported or assumed) lifetime.
    pub fn is_expired(&self) -> bool {
        let age = Utc::now()
            .signed_duration_since(self.obtained_at)
            .to_std()
            .unwrap_or_default();
        age >= self.lifetime()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("obtained_at", &self.obtained_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// What happened to a single probe. Failures are data, not errors.
///
/// A response whose body breaks off mid-transfer is still a `Response`: the
/// status line and headers are kept, `body` holds nothing and `body_error`
/// describes the read failure.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Response {
        version: String,
        status: u16,
        reason: Option<String>,
        headers: Vec<(String, String)>,
        body: String,
        body_error: Option<String>,
    },
    Failed {
        error: String,
    },
}

impl ProbeOutcome {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Response { status, .. } => Some(*status),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status(), Some(s) if (200..300).contains(&s))
    }

    /// Short label for console output, e.g. `200 OK` or `ERROR`.
    pub fn label(&self) -> String {
        match self {
            ProbeOutcome::Response { status, reason, .. } => match reason {
                Some(r) => format!("{} {}", status, r),
                None => status.to_string(),
            },
            ProbeOutcome::Failed { .. } => "ERROR".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeRecord {
    /// 1-based position in request order.
    pub index: usize,
    pub path: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Stable,
    Unstable,
    Failed,
}

// Labels follow the endpoint summary of the manual QA suite: `OK`, `UNSTABLE`, `FAILED`.
impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stability::Stable => "OK",
            Stability::Unstable => "UNSTABLE",
            Stability::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct EndpointSummary {
    pub path: String,
    pub attempts: usize,
    pub successes: usize,
    /// Status label and occurrence count, ordered by status code; transport errors last.
    pub distribution: Vec<(String, usize)>,
    pub average_elapsed: Duration,
    pub stability: Stability,
}

#[derive(Tabled)]
pub struct SummaryTableRow {
    pub endpoint: String,
    pub status: String,
    pub attempts: usize,
    pub passed: usize,
    pub failed: usize,
    pub observed: String,
    pub avg_time: String,
}
