// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build the shared context and hand
//   the arguments to `cli::run`.
// - Command failures are reported by `cli::run`; only setup errors reach
//   the `anyhow` return path.

use aexus_cli::api::ApiClient;
use aexus_cli::cli;
use aexus_cli::commands::Context;
use aexus_cli::config::Config;
use aexus_cli::store::StateDirs;
use anyhow::Context as _;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("AEXUS_LOG", "warn")).init();

    let ctx = Context {
        config: Config::load(),
        state: StateDirs::from_home(),
        api: ApiClient::new().context("Failed to build HTTP client")?,
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    Ok(cli::run(&ctx, &args))
}
