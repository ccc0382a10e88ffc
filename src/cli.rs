// Argument handling and dispatch. Help and version words are recognised
// before clap sees the arguments so that bare `help`/`version` and `-v`
// behave like their flag forms; unknown commands print usage.

use crate::commands::{self, Context};
use crate::error::CliResult;
use crate::layout::banner;
use crate::ui;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

pub const CLI_NAME: &str = "aexus";
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

const COMMANDS: [&str; 4] = ["scenario", "analyst", "auth", "points"];

#[derive(Parser, Debug)]
#[command(name = CLI_NAME, disable_version_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a what-if scenario simulation
    Scenario {
        /// Scenario text; prompted for when omitted
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Scan a Solana token mint
    Analyst {
        /// Mint address; prompted for when omitted
        mint: Option<String>,
    },
    /// Configure a local identity session
    Auth {
        /// Remove the stored session instead
        #[arg(long)]
        logout: bool,
    },
    /// Inspect and adjust local progression points
    Points {
        /// Recent entries to show per history list
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[derive(Debug)]
pub enum Invocation {
    Usage { banner: bool },
    Version,
    Run(Command),
    Unknown(String),
    Invalid(clap::Error),
}

pub fn usage() -> String {
    [
        "",
        &format!("Usage: {} <command> [options]", CLI_NAME),
        "",
        "Commands:",
        "  scenario [text]     Run a what-if scenario simulation",
        "  analyst [mint]      Scan a Solana token mint",
        "  auth [--logout]     Configure a local identity session",
        "  points [--limit N]  Inspect and adjust local progression points",
        "",
        "Global options:",
        "  -h, --help          Show this help message",
        "  -v, --version       Show CLI version",
        "",
    ]
    .join("\n")
}

fn is_help(token: &str) -> bool {
    matches!(token, "-h" | "--help" | "help")
}

fn is_version(token: &str) -> bool {
    matches!(token, "-v" | "--version" | "version")
}

/// Classify the arguments (program name excluded).
pub fn parse_invocation(args: &[String]) -> Invocation {
    let Some(first) = args.first() else {
        return Invocation::Usage { banner: true };
    };
    if is_help(first) {
        return Invocation::Usage { banner: false };
    }
    if is_version(first) {
        return Invocation::Version;
    }
    if !COMMANDS.contains(&first.as_str()) {
        return Invocation::Unknown(first.clone());
    }
    let argv = std::iter::once(CLI_NAME.to_string()).chain(args.iter().cloned());
    match Cli::try_parse_from(argv) {
        Ok(cli) => Invocation::Run(cli.command),
        Err(e) => Invocation::Invalid(e),
    }
}

fn dispatch(ctx: &Context, command: &Command) -> (&'static str, CliResult<()>) {
    match command {
        Command::Scenario { text } => (
            "Scenario engine returned an error:",
            commands::run_scenario(ctx, text),
        ),
        Command::Analyst { mint } => ("Scan failed:", commands::run_analyst(ctx, mint.as_deref())),
        Command::Auth { logout } => ("Auth failed:", commands::run_auth(ctx, *logout)),
        Command::Points { limit } => ("Points update failed:", commands::run_points(ctx, *limit)),
    }
}

/// Run one invocation and report the outcome as an exit code. Failures
/// are printed, never propagated.
pub fn run(ctx: &Context, args: &[String]) -> ExitCode {
    match parse_invocation(args) {
        Invocation::Usage { banner: show_banner } => {
            if show_banner {
                println!("{}", banner());
            }
            print!("{}", usage());
            ExitCode::SUCCESS
        }
        Invocation::Version => {
            println!("{} {}", CLI_NAME, CLI_VERSION);
            ExitCode::SUCCESS
        }
        Invocation::Unknown(command) => {
            eprintln!("Unknown command: {}", command);
            print!("{}", usage());
            ExitCode::FAILURE
        }
        Invocation::Invalid(e) => {
            let _ = e.print();
            if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Invocation::Run(command) => {
            let (prefix, outcome) = dispatch(ctx, &command);
            match outcome {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    ui::report_error(prefix, &e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
