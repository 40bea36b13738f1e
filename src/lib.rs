//! API Probe CLI Library
//!
//! Black-box probing of a remote REST API: exchange a bootstrap refresh token
//! for an access token, issue strictly sequential authenticated GETs with a
//! fixed delay, and record every raw response to a timestamped report.
//!
//! # Modules
//!
//! - `cli` - Command implementations (`discover`, `timing`, `token`)
//! - `config` - Environment and `.env` configuration
//! - `management` - Report buffering/persistence and endpoint summaries
//! - `remote` - Token exchange, probe capture and the probing session
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod cli;
pub mod config;
pub mod management;
pub mod remote;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Probing {} endpoints", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates with exit code 1. Only for fatal conditions such as a missing
/// credential or a failed token exchange; individual probe failures are
/// recorded, never reported through this macro.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
