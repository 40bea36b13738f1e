//! Configuration management for apiprobe.
//!
//! Values come from environment variables, optionally seeded from `.env` files.
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`apiprobe/.env`)
//! 4. Application defaults (where applicable)

use std::{env, ops::RangeInclusive, path::PathBuf, time::Duration};

/// Remote API used when `BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://qa-home-assignment.magmadevs.com";

/// Token exchange endpoint, relative to the base URL.
pub const AUTH_GENERATE_ENDPOINT: &str = "/api/auth/generate";

/// Endpoint identifiers swept by `apiprobe discover`.
pub const DISCOVERY_ENDPOINTS: RangeInclusive<u32> = 1..=6;

/// Pause between two discovery probes.
pub const DISCOVERY_DELAY: Duration = Duration::from_secs(1);

pub const DEFAULT_TIMING_ENDPOINT: &str = "/api/test/2";
pub const DEFAULT_TIMING_COUNT: u32 = 20;
pub const DEFAULT_TIMING_DELAY: &str = "0.5";

/// Directory for reports when neither `--output-dir` nor `PROBE_OUTPUT_DIR` is given.
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Loads environment variables from `.env` files.
///
/// The working directory `.env` is read first, then `apiprobe/.env` in the
/// platform-specific local data directory:
/// - Linux: `~/.local/share/apiprobe/.env`
/// - macOS: `~/Library/Application Support/apiprobe/.env`
/// - Windows: `%LOCALAPPDATA%/apiprobe/.env`
///
/// Variables that are already set are never overwritten, so the real
/// environment always wins. Missing files are not an error.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(format!("Cannot parse .env: {}", e)),
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("apiprobe/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("Cannot parse {}: {}", path.display(), e))?;
    }

    Ok(())
}

/// Returns the base URL of the remote API, without a trailing slash.
pub fn base_url() -> String {
    env::var("BASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim()
        .trim_end_matches('/')
        .to_string()
}

/// Returns the bootstrap refresh token.
///
/// # Errors
///
/// Fails when `INITIAL_REFRESH_TOKEN` is unset or blank. Nothing should reach
/// the network without it.
pub fn refresh_token() -> Result<String, String> {
    match env::var("INITIAL_REFRESH_TOKEN") {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err("INITIAL_REFRESH_TOKEN must be set".to_string()),
    }
}

/// Whether TLS certificates are verified. Only an explicit `false` disables it.
pub fn ssl_verify() -> bool {
    env::var("SSL_VERIFY")
        .map(|v| !v.trim().eq_ignore_ascii_case("false"))
        .unwrap_or(true)
}

/// Optional per-request timeout from `PROBE_TIMEOUT_SECS`.
///
/// # Errors
///
/// Fails when the variable is set but is not a positive number of seconds
/// that fits in a [`Duration`].
pub fn request_timeout() -> Result<Option<Duration>, String> {
    match env::var("PROBE_TIMEOUT_SECS") {
        Ok(raw) if !raw.trim().is_empty() => parse_timeout(&raw).map(Some),
        _ => Ok(None),
    }
}

/// Parses a `PROBE_TIMEOUT_SECS` value.
pub fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("PROBE_TIMEOUT_SECS is not a number: {}", raw))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("PROBE_TIMEOUT_SECS must be positive, got {}", raw));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| format!("PROBE_TIMEOUT_SECS is out of range ({}): {}", raw, e))
}

/// Directory receiving the probe reports.
pub fn output_dir() -> PathBuf {
    env::var("PROBE_OUTPUT_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// Everything a probing session needs to talk to the remote API.
#[derive(Clone)]
pub struct Settings {
    pub base_url: String,
    pub refresh_token: String,
    pub ssl_verify: bool,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Gathers the settings from the environment.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            base_url: base_url(),
            refresh_token: refresh_token()?,
            ssl_verify: ssl_verify(),
            timeout: request_timeout()?,
        })
    }

    /// Settings for a given base URL and credential, with verification on and no timeout.
    pub fn new(base_url: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            refresh_token: refresh_token.into(),
            ssl_verify: true,
            timeout: None,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("refresh_token", &"<redacted>")
            .field("ssl_verify", &self.ssl_verify)
            .field("timeout", &self.timeout)
            .finish()
    }
}
