use std::{path::PathBuf, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use apiprobe::{cli, config, error, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Probe /api/test/1 through /api/test/6 with a 1 second delay and record every response
    Discover(DiscoverOptions),

    /// Time repeated requests against one endpoint
    Timing(TimingOptions),

    /// Print a fresh access token
    Token,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverOptions {
    /// Number of sweeps over all endpoints
    #[clap(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: u32,

    /// Directory for the report (default: PROBE_OUTPUT_DIR or ./reports)
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct TimingOptions {
    /// Endpoint path to probe
    #[clap(default_value = config::DEFAULT_TIMING_ENDPOINT, value_parser = utils::parse_endpoint_path)]
    pub endpoint_path: String,

    /// Number of requests
    #[clap(default_value_t = config::DEFAULT_TIMING_COUNT)]
    pub request_count: u32,

    /// Delay between requests in seconds
    #[clap(default_value = config::DEFAULT_TIMING_DELAY, value_parser = utils::parse_delay)]
    pub delay_seconds: Duration,

    /// Directory for the report (default: PROBE_OUTPUT_DIR or ./reports)
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Discover(opt) => cli::discover(opt.rounds, opt.output_dir).await,
        Command::Timing(opt) => {
            cli::timing(
                opt.endpoint_path,
                opt.request_count,
                opt.delay_seconds,
                opt.output_dir,
            )
            .await
        }
        Command::Token => cli::token().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
