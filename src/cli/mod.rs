//! Command implementations behind the `apiprobe` subcommands.
//!
//! Each command reads its settings from the environment, opens a
//! [`Session`](crate::remote::Session) (which acquires the access token) and
//! terminates through [`error!`](crate::error) when that fails. Probe failures
//! never end a command early.

mod discover;
mod timing;
mod token;

use crate::{config::Settings, error, info, remote::Session, warning};

pub use discover::discover;
pub use timing::timing;
pub use token::token;

async fn open_session(announce: bool) -> Session {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    if announce {
        if !settings.ssl_verify {
            warning!("SSL_VERIFY=false: TLS certificates are not verified.");
        }
        info!("Base URL: {}", settings.base_url);
    }

    match Session::open(&settings).await {
        Ok(session) => session,
        Err(e) => error!("Failed to acquire access token: {}", e),
    }
}

fn warn_if_token_expired(session: &Session) {
    if session.token().is_expired() {
        warning!(
            "The access token obtained at {} has likely expired during this run; later 401 responses may be caused by that.",
            session.token().obtained_at().format("%H:%M:%S")
        );
    }
}
