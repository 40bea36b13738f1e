//! # Remote API Module
//!
//! Talks to the API under observation. A [`Session`] owns the HTTP client and
//! the access token of one run:
//!
//! ```text
//! Session::open ──► POST /api/auth/generate   (exactly once, fatal on failure)
//!      │
//!      ▼
//! Session::run  ──► GET /api/test/{id}  ─ sleep(delay) ─►  GET ...  ─► ...
//!                   (each attempt captured as a ProbeRecord, never aborts)
//! ```
//!
//! Requests are strictly sequential: a probe completes, fails or times out
//! before the next one is sent. The delay is fixed and does not react to
//! observed status codes.

pub mod auth;
pub mod probe;

use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;

use crate::{
    config::Settings,
    types::{AccessToken, ProbeRecord},
};

pub use auth::{AuthError, acquire_token};

/// Builds the HTTP client shared by the token exchange and all probes.
///
/// The client identifies itself as `apiprobe/<version>`. Certificate
/// verification follows `settings.ssl_verify`, and a request timeout is only
/// set when `settings.timeout` is present; otherwise requests wait as long as
/// the remote side keeps the connection open.
///
/// # Errors
///
/// Returns the `reqwest` error when the TLS backend cannot be initialised.
pub fn build_client(settings: &Settings) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(!settings.ssl_verify);

    if let Some(timeout) = settings.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// One authenticated probing run against the remote API.
pub struct Session {
    client: Client,
    base_url: String,
    token: AccessToken,
}

impl Session {
    /// Builds the client and acquires the access token.
    ///
    /// This is the only place a token is requested. Every probe of the session
    /// reuses it, and it is never refreshed.
    ///
    /// # Arguments
    ///
    /// * `settings` - Base URL, bootstrap refresh token and client options
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] when the client cannot be built or the token
    /// exchange fails. No probe has been issued at that point, and since no
    /// `Session` exists, none can be.
    ///
    /// # Example
    ///
    /// ```
    /// let session = Session::open(&Settings::from_env()?).await?;
    /// let records = session.run(&paths, Duration::from_secs(1), |_| {}).await;
    /// ```
    pub async fn open(settings: &Settings) -> Result<Self, AuthError> {
        let client = build_client(settings).map_err(AuthError::Client)?;
        let token = acquire_token(&client, &settings.base_url, &settings.refresh_token).await?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Probes a single path with the session's token.
    ///
    /// # Arguments
    ///
    /// * `index` - 1-based request position, copied into the record
    /// * `path` - Endpoint path relative to the base URL, e.g. `/api/test/2`
    ///
    /// # Returns
    ///
    /// The captured [`ProbeRecord`]. Failures are part of the record; see
    /// [`probe::probe`].
    pub async fn probe(&self, index: usize, path: &str) -> ProbeRecord {
        probe::probe(&self.client, &self.base_url, &self.token, index, path).await
    }

    /// Probes every path in order, sleeping `delay` between consecutive probes.
    ///
    /// Each request finishes before the delay starts, and the delay always
    /// runs in full. There is no sleep after the last probe. The loop never
    /// stops early and never changes its pace based on what it observes.
    ///
    /// # Arguments
    ///
    /// * `paths` - Endpoint paths in request order; repeats are allowed
    /// * `delay` - Fixed pause between two consecutive probes
    /// * `on_record` - Called with each record as soon as it is captured,
    ///   e.g. to print progress or append it to a report
    ///
    /// # Returns
    ///
    /// Exactly one record per path, in request order.
    pub async fn run<F>(&self, paths: &[String], delay: Duration, mut on_record: F) -> Vec<ProbeRecord>
    where
        F: FnMut(&ProbeRecord),
    {
        let mut records = Vec::with_capacity(paths.len());

        for (i, path) in paths.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                sleep(delay).await;
            }

            let record = self.probe(i + 1, path).await;
            on_record(&record);
            records.push(record);
        }

        records
    }
}
