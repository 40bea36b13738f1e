use std::time::Instant;

use chrono::Utc;
use reqwest::{Client, Response};

use crate::{
    types::{AccessToken, ProbeOutcome, ProbeRecord},
    utils,
};

/// Issues one authenticated GET and captures whatever comes back.
///
/// # Arguments
///
/// * `client` - Shared HTTP client of the session
/// * `base_url` - Remote API root, e.g. `https://api.example.com`
/// * `token` - Access token sent as `Authorization: Bearer ...`
/// * `index` - 1-based position of this request in the run
/// * `path` - Endpoint path, e.g. `/api/test/3`
///
/// # Returns
///
/// Always a [`ProbeRecord`]; this function never fails. Any HTTP status,
/// 2xx or not, becomes a [`ProbeOutcome::Response`] with the status line and
/// every header. If the body breaks off, the response keeps its status and
/// headers and the read error lands in `body_error`. Connection errors and
/// timeouts before any status arrives become [`ProbeOutcome::Failed`].
///
/// `elapsed` covers the full round trip including the body.
pub async fn probe(
    client: &Client,
    base_url: &str,
    token: &AccessToken,
    index: usize,
    path: &str,
) -> ProbeRecord {
    let url = utils::join_url(base_url, path);
    let started_at = Utc::now();
    let start = Instant::now();

    let outcome = match client.get(&url).bearer_auth(token.as_str()).send().await {
        Ok(response) => capture(response).await,
        Err(e) => ProbeOutcome::Failed {
            error: utils::error_chain(&e),
        },
    };

    ProbeRecord {
        index,
        path: path.to_string(),
        started_at,
        elapsed: start.elapsed(),
        outcome,
    }
}

async fn capture(response: Response) -> ProbeOutcome {
    let version = format!("{:?}", response.version());
    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let (body, body_error) = match response.text().await {
        Ok(body) => (body, None),
        Err(e) => (String::new(), Some(utils::error_chain(&e))),
    };

    ProbeOutcome::Response {
        version,
        status: status.as_u16(),
        reason: status.canonical_reason().map(str::to_string),
        headers,
        body,
        body_error,
    }
}
