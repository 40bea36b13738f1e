use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::{
    config,
    types::{AccessToken, TokenRequest},
    utils,
};

/// Reasons a run cannot obtain its access token. All of them are fatal.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("cannot build HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("token request failed: {0}")]
    Request(String),
    #[error("token response (HTTP {status}) is not valid JSON: {source}")]
    InvalidJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("token response (HTTP {status}) has no access_token")]
    MissingAccessToken { status: u16 },
    #[error("token response (HTTP {status}) has an empty access_token")]
    EmptyAccessToken { status: u16 },
}

/// Exchanges the bootstrap refresh token for a short-lived access token.
///
/// Sends one `POST {base_url}/api/auth/generate` with the JSON body
/// `{"refresh_token": ...}`. The body is parsed as JSON whatever the status,
/// since the API reports errors in JSON as well; only a non-empty string
/// `access_token` counts as success. There is no retry.
///
/// # Arguments
///
/// * `client` - HTTP client to send the request with
/// * `base_url` - Remote API root
/// * `refresh_token` - Long-lived bootstrap credential
///
/// # Errors
///
/// - [`AuthError::Request`] when the request or reading the body fails
/// - [`AuthError::InvalidJson`] when the body is not JSON
/// - [`AuthError::MissingAccessToken`] when `access_token` is absent or not a string
/// - [`AuthError::EmptyAccessToken`] when `access_token` is blank
pub async fn acquire_token(
    client: &Client,
    base_url: &str,
    refresh_token: &str,
) -> Result<AccessToken, AuthError> {
    let url = utils::join_url(base_url, config::AUTH_GENERATE_ENDPOINT);

    let response = client
        .post(&url)
        .json(&TokenRequest { refresh_token })
        .send()
        .await
        .map_err(|e| AuthError::Request(utils::error_chain(&e)))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::Request(utils::error_chain(&e)))?;

    parse_token_response(status, &body)
}

/// Extracts the access token from a token endpoint response body.
pub fn parse_token_response(status: u16, body: &str) -> Result<AccessToken, AuthError> {
    let json: Value =
        serde_json::from_str(body).map_err(|source| AuthError::InvalidJson { status, source })?;

    let token = match json.get("access_token") {
        Some(Value::String(token)) => token.trim(),
        _ => return Err(AuthError::MissingAccessToken { status }),
    };

    if token.is_empty() {
        return Err(AuthError::EmptyAccessToken { status });
    }

    let expires_in = json.get("expires_in").and_then(Value::as_u64);

    Ok(AccessToken::new(token.to_string(), expires_in))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_token_with_extra_fields() {
        let token = parse_token_response(200, r#"{"access_token":"abc","token_type":"bearer"}"#)
            .expect("token");
        assert_eq!(token.as_str(), "abc");
        assert_eq!(token.lifetime(), crate::types::DEFAULT_TOKEN_LIFETIME);
    }

    #[test]
    fn honours_reported_lifetime() {
        let token =
            parse_token_response(200, r#"{"access_token":"abc","expires_in":60}"#).expect("token");
        assert_eq!(token.lifetime().as_secs(), 60);
        assert!(!token.is_expired());
    }

    #[test]
    fn rejects_empty_token() {
        let err = parse_token_response(200, r#"{"access_token":""}"#).unwrap_err();
        assert!(matches!(err, AuthError::EmptyAccessToken { status: 200 }));
    }

    #[test]
    fn rejects_missing_or_non_string_token() {
        assert!(matches!(
            parse_token_response(401, r#"{"detail":"invalid refresh token"}"#),
            Err(AuthError::MissingAccessToken { status: 401 })
        ));
        assert!(matches!(
            parse_token_response(200, r#"{"access_token":42}"#),
            Err(AuthError::MissingAccessToken { .. })
        ));
    }

    #[test]
    fn rejects_non_json_body() {
        let err = parse_token_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, AuthError::InvalidJson { status: 502, .. }));
        assert!(err.to_string().contains("HTTP 502"));
    }
}
